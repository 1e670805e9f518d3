use crate::converter::{value_mismatch, Converter};
use crate::error::{ConvertError, Result};
use crate::json::JsonValue;
use crate::registry::ConverterRegistry;
use crate::types::{names, TypeDescriptor};
use crate::value::Value;

/// Converter for `Option<T>`: JSON `null` is absence, anything else goes
/// through the converter for `T`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalConverter;

impl Converter for OptionalConverter {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        ty.is(names::OPTION) && ty.args.len() <= 1
    }

    fn deserialize(&self, json: &JsonValue, ty: &TypeDescriptor, registry: &ConverterRegistry) -> Result<Value> {
        let [inner_type] = ty.args.as_slice() else {
            return Err(ConvertError::ArityMismatch {
                ty: ty.clone(),
                expected: 1,
                found: ty.args.len(),
            });
        };
        if json.is_null() {
            return Ok(Value::none());
        }
        let inner = registry.resolve(inner_type)?.deserialize(json, inner_type, registry)?;
        Ok(Value::some(inner))
    }

    fn serialize(&self, value: &Value, ty: &TypeDescriptor, registry: &ConverterRegistry) -> Result<JsonValue> {
        match value {
            Value::Optional(None) => Ok(JsonValue::Null),
            Value::Optional(Some(inner)) => match ty.arg(0) {
                Some(inner_type) => registry.resolve(inner_type)?.serialize(inner, inner_type, registry),
                None => registry.serialize(inner),
            },
            other => Err(value_mismatch(ty, other)),
        }
    }
}
