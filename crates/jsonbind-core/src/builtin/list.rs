use crate::converter::{value_mismatch, Converter};
use crate::error::{ConvertError, Result};
use crate::error_tree::ErrorTree;
use crate::json::{self, JsonValue};
use crate::registry::ConverterRegistry;
use crate::types::{names, TypeDescriptor};
use crate::value::Value;

/// Converter for `List<T>` (JSON arrays).
///
/// Every element is attempted; element failures are reported below their
/// index. A non-array fails at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListConverter;

impl ListConverter {
    fn element_type(ty: &TypeDescriptor) -> Result<&TypeDescriptor> {
        match ty.args.as_slice() {
            [element] => Ok(element),
            args => Err(ConvertError::ArityMismatch {
                ty: ty.clone(),
                expected: 1,
                found: args.len(),
            }),
        }
    }
}

impl Converter for ListConverter {
    /// Accepts `List` without arguments as well: that is the erased runtime
    /// type of a list value, which can still be serialized element by element.
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        ty.is(names::LIST) && ty.args.len() <= 1
    }

    fn deserialize(&self, json: &JsonValue, ty: &TypeDescriptor, registry: &ConverterRegistry) -> Result<Value> {
        let element_type = Self::element_type(ty)?;
        let JsonValue::Array(items) = json else {
            return Err(ConvertError::validation(json::expected("array", json)));
        };
        let converter = registry.resolve(element_type)?;

        let mut values = Vec::with_capacity(items.len());
        let mut errors = ErrorTree::new();
        for (index, item) in items.iter().enumerate() {
            match converter.deserialize(item, element_type, registry) {
                Ok(value) => values.push(value),
                Err(ConvertError::Validation(tree)) => errors.add_failure(index, tree),
                Err(other) => return Err(other),
            }
        }

        if errors.is_empty() {
            Ok(Value::List(values))
        } else {
            Err(ConvertError::Validation(errors))
        }
    }

    fn serialize(&self, value: &Value, ty: &TypeDescriptor, registry: &ConverterRegistry) -> Result<JsonValue> {
        let Value::List(items) = value else {
            return Err(value_mismatch(ty, value));
        };
        let items = match ty.arg(0) {
            Some(element_type) => {
                let converter = registry.resolve(element_type)?;
                items
                    .iter()
                    .map(|item| converter.serialize(item, element_type, registry))
                    .collect::<Result<Vec<_>>>()?
            }
            None => items
                .iter()
                .map(|item| registry.serialize(item))
                .collect::<Result<Vec<_>>>()?,
        };
        Ok(JsonValue::Array(items))
    }
}
