use crate::converter::{value_mismatch, Converter};
use crate::error::Result;
use crate::json::JsonValue;
use crate::registry::ConverterRegistry;
use crate::types::{names, TypeDescriptor};
use crate::value::Value;

/// Converter for `Json`: embeds arbitrary JSON unchanged in either direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPassthroughConverter;

impl Converter for JsonPassthroughConverter {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        ty.is(names::JSON) && !ty.is_generic()
    }

    fn deserialize(&self, json: &JsonValue, _ty: &TypeDescriptor, _registry: &ConverterRegistry) -> Result<Value> {
        Ok(Value::Json(json.clone()))
    }

    fn serialize(&self, value: &Value, ty: &TypeDescriptor, _registry: &ConverterRegistry) -> Result<JsonValue> {
        match value {
            Value::Json(json) => Ok(json.clone()),
            other => Err(value_mismatch(ty, other)),
        }
    }
}
