use crate::converter::{value_mismatch, Converter};
use crate::error::{ConvertError, Result};
use crate::json::JsonValue;
use crate::registry::ConverterRegistry;
use crate::types::{names, TypeDescriptor};
use crate::value::Value;

/// Converter for [`crate::TypeWrapper`] values.
///
/// Serialization only: the wrapped value is serialized as the wrapper's
/// explicit type. Wrappers carry no information a parser could use, so
/// deserializing one is an unsupported operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeWrapperConverter;

impl Converter for TypeWrapperConverter {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        ty.is(names::TYPE_WRAPPER)
    }

    fn deserialize(&self, _json: &JsonValue, _ty: &TypeDescriptor, _registry: &ConverterRegistry) -> Result<Value> {
        Err(ConvertError::UnsupportedOperation(
            "TypeWrapper cannot be deserialized".to_string(),
        ))
    }

    fn serialize(&self, value: &Value, ty: &TypeDescriptor, registry: &ConverterRegistry) -> Result<JsonValue> {
        match value {
            Value::Wrapped(wrapper) => registry.serialize_as(&wrapper.value, &wrapper.ty),
            other => Err(value_mismatch(ty, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryBuilder;
    use serde_json::json;

    #[test]
    fn test_serializes_as_explicit_type() {
        let registry = RegistryBuilder::new().seal();
        let wrapped = Value::wrap(
            Value::List(vec![Value::some(Value::Int(1)), Value::none()]),
            TypeDescriptor::list(TypeDescriptor::option(TypeDescriptor::i8())),
        );
        let json = TypeWrapperConverter
            .serialize(&wrapped, &TypeDescriptor::type_wrapper(), &registry)
            .unwrap();
        assert_eq!(json, json!([1, null]));
    }

    #[test]
    fn test_explicit_type_is_enforced() {
        let registry = RegistryBuilder::new().seal();
        let wrapped = Value::wrap(Value::Int(300), TypeDescriptor::i8());
        let err = TypeWrapperConverter
            .serialize(&wrapped, &TypeDescriptor::type_wrapper(), &registry)
            .unwrap_err();
        assert!(matches!(err, ConvertError::ValueMismatch { .. }));
    }

    #[test]
    fn test_deserialize_is_unsupported() {
        let registry = RegistryBuilder::new().seal();
        let err = TypeWrapperConverter
            .deserialize(&json!(1), &TypeDescriptor::type_wrapper(), &registry)
            .unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedOperation(_)));
    }
}
