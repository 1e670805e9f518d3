//! Per-call bookkeeping for converter resolution.

use crate::converter::Converter;
use crate::types::TypeDescriptor;
use std::collections::HashMap;
use std::sync::Arc;

/// State of one top-level resolve call.
///
/// Holds the placeholders of records under construction and every converter
/// finished along the way. Nothing here is visible to other threads until the
/// registry publishes [`Resolution::into_completed`] to its shared cache, so a
/// concurrent caller can never observe a placeholder that is not yet
/// redirected.
#[derive(Default)]
pub(crate) struct Resolution {
    entries: HashMap<TypeDescriptor, Arc<dyn Converter>>,
    completed: Vec<(TypeDescriptor, Arc<dyn Converter>)>,
}

impl Resolution {
    pub fn get(&self, ty: &TypeDescriptor) -> Option<Arc<dyn Converter>> {
        self.entries.get(ty).cloned()
    }

    pub fn install_placeholder(&mut self, ty: &TypeDescriptor, placeholder: Arc<dyn Converter>) {
        self.entries.insert(ty.clone(), placeholder);
    }

    /// Records a finished converter; later lookups in this resolution get it
    /// directly instead of the placeholder.
    pub fn complete(&mut self, ty: &TypeDescriptor, converter: Arc<dyn Converter>) {
        self.entries.insert(ty.clone(), converter.clone());
        self.completed.push((ty.clone(), converter));
    }

    pub fn into_completed(self) -> Vec<(TypeDescriptor, Arc<dyn Converter>)> {
        self.completed
    }
}
