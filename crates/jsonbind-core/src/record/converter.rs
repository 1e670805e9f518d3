//! Converters synthesized for record types.

use super::shape::RecordShape;
use crate::converter::{require_non_null, Converter};
use crate::error::{ConvertError, Result};
use crate::error_tree::{ErrorTree, MISSING_PROPERTY, UNEXPECTED_PROPERTY};
use crate::json::{self, JsonValue, Map};
use crate::naming::Name;
use crate::registry::ConverterRegistry;
use crate::types::TypeDescriptor;
use crate::value::Value;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// A record field with its type arguments substituted and its converter
/// resolved.
struct ResolvedField {
    name: String,
    ty: TypeDescriptor,
    converter: Arc<dyn Converter>,
}

/// Converter for one instantiation of a record type, e.g. `Inner<String>`.
pub struct RecordConverter {
    ty: TypeDescriptor,
    shape: Arc<dyn RecordShape>,
    fields: Vec<ResolvedField>,
}

impl RecordConverter {
    /// Builds the converter for `ty`, resolving every field type through
    /// `resolve`.
    ///
    /// `resolve` may hand back a placeholder for a record still under
    /// construction; field converters are only called after the whole
    /// resolution has finished.
    pub fn build<F>(ty: &TypeDescriptor, shape: Arc<dyn RecordShape>, mut resolve: F) -> Result<Self>
    where
        F: FnMut(&TypeDescriptor) -> Result<Arc<dyn Converter>>,
    {
        let bindings = bind_type_arguments(ty, shape.as_ref())?;
        let mut fields = Vec::with_capacity(shape.fields().len());
        for field in shape.fields() {
            let field_ty = field
                .ty
                .substitute(&bindings)
                .map_err(|variable| ConvertError::UnboundTypeVariable {
                    record: shape.name(),
                    variable,
                })?;
            let converter = resolve(&field_ty)?;
            fields.push(ResolvedField {
                name: field.name.clone(),
                ty: field_ty,
                converter,
            });
        }
        Ok(RecordConverter {
            ty: ty.clone(),
            shape,
            fields,
        })
    }

    /// Field names with the concrete types they are converted as.
    pub fn field_types(&self) -> impl Iterator<Item = (&str, &TypeDescriptor)> {
        self.fields.iter().map(|field| (field.name.as_str(), &field.ty))
    }
}

// Field converters are left out: in a recursive record they lead back here.
impl fmt::Debug for RecordConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordConverter")
            .field("ty", &self.ty)
            .field("fields", &self.field_types().collect::<Vec<_>>())
            .finish()
    }
}

/// Pairs the record's type parameters with the descriptor's arguments.
pub(crate) fn bind_type_arguments(
    ty: &TypeDescriptor,
    shape: &dyn RecordShape,
) -> Result<IndexMap<Name, TypeDescriptor>> {
    let params = shape.type_parameters();
    if params.len() != ty.args.len() {
        return Err(ConvertError::ArityMismatch {
            ty: ty.clone(),
            expected: params.len(),
            found: ty.args.len(),
        });
    }
    Ok(params.iter().copied().zip(ty.args.iter().cloned()).collect())
}

impl Converter for RecordConverter {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        *ty == self.ty
    }

    fn deserialize(&self, json: &JsonValue, _ty: &TypeDescriptor, registry: &ConverterRegistry) -> Result<Value> {
        let JsonValue::Object(members) = json else {
            return Err(ConvertError::validation(json::expected("object", json)));
        };

        let mut errors = ErrorTree::new();
        for key in members.keys() {
            if !self.fields.iter().any(|field| &field.name == key) {
                errors.add_message_at(key.as_str(), UNEXPECTED_PROPERTY);
            }
        }

        let mut values = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let Some(member) = members.get(&field.name) else {
                errors.add_message_at(field.name.as_str(), MISSING_PROPERTY);
                continue;
            };
            match field.converter.deserialize(member, &field.ty, registry) {
                Ok(value) => values.push(value),
                Err(ConvertError::Validation(tree)) => errors.add_failure(field.name.as_str(), tree),
                Err(other) => return Err(other),
            }
        }

        if !errors.is_empty() {
            return Err(ConvertError::Validation(errors));
        }
        self.shape.construct(&self.ty, values)
    }

    fn serialize(&self, value: &Value, _ty: &TypeDescriptor, registry: &ConverterRegistry) -> Result<JsonValue> {
        require_non_null(value)?;
        let values = self.shape.field_values(&self.ty, value)?;
        let mut members = Map::with_capacity(self.fields.len());
        for (field, value) in self.fields.iter().zip(values) {
            let json = field.converter.serialize(&value, &field.ty, registry)?;
            members.insert(field.name.clone(), json);
        }
        Ok(JsonValue::Object(members))
    }
}
