//! Placeholder converters that break cycles in recursive record graphs.

use crate::converter::Converter;
use crate::error::{ConvertError, Result};
use crate::json::JsonValue;
use crate::registry::ConverterRegistry;
use crate::types::TypeDescriptor;
use crate::value::Value;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Stands in for the converter of a record that is still being built.
///
/// Field converters resolved while the record is under construction may
/// capture the proxy. Once the real converter exists the proxy is redirected
/// to it, exactly once, and from then on forwards every call.
pub struct ProxyConverter {
    ty: TypeDescriptor,
    target: OnceLock<Arc<dyn Converter>>,
}

impl ProxyConverter {
    pub fn new(ty: TypeDescriptor) -> Self {
        ProxyConverter {
            ty,
            target: OnceLock::new(),
        }
    }

    /// Points the proxy at the finished converter.
    pub fn redirect(&self, target: Arc<dyn Converter>) -> Result<()> {
        self.target.set(target).map_err(|_| {
            ConvertError::UnsupportedOperation(format!("placeholder for {} redirected twice", self.ty))
        })
    }

    pub fn is_resolved(&self) -> bool {
        self.target.get().is_some()
    }

    fn target(&self) -> Result<&Arc<dyn Converter>> {
        self.target
            .get()
            .ok_or_else(|| ConvertError::UnresolvedProxy(self.ty.clone()))
    }
}

// Manual impl: the target may refer back to this proxy.
impl fmt::Debug for ProxyConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConverter")
            .field("ty", &self.ty)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

impl Converter for ProxyConverter {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        *ty == self.ty
    }

    fn deserialize(&self, json: &JsonValue, ty: &TypeDescriptor, registry: &ConverterRegistry) -> Result<Value> {
        self.target()?.deserialize(json, ty, registry)
    }

    fn serialize(&self, value: &Value, ty: &TypeDescriptor, registry: &ConverterRegistry) -> Result<JsonValue> {
        self.target()?.serialize(value, ty, registry)
    }
}
