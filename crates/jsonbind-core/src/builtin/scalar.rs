//! Scalar converters: unit, booleans, fixed-width integers, floats, strings.

use crate::converter::{value_mismatch, Converter};
use crate::error::{ConvertError, Result};
use crate::json::{self, JsonValue, Number};
use crate::naming::Name;
use crate::registry::ConverterRegistry;
use crate::types::{names, TypeDescriptor};
use crate::value::Value;

/// Converter for `Unit`: a field whose JSON value must be `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitConverter;

impl Converter for UnitConverter {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        ty.is(names::UNIT) && !ty.is_generic()
    }

    fn deserialize(&self, json: &JsonValue, _ty: &TypeDescriptor, _registry: &ConverterRegistry) -> Result<Value> {
        match json {
            JsonValue::Null => Ok(Value::Unit),
            other => Err(ConvertError::validation(json::expected("null", other))),
        }
    }

    fn serialize(&self, value: &Value, ty: &TypeDescriptor, _registry: &ConverterRegistry) -> Result<JsonValue> {
        match value {
            Value::Unit => Ok(JsonValue::Null),
            other => Err(value_mismatch(ty, other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanConverter;

impl Converter for BooleanConverter {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        ty.is(names::BOOL) && !ty.is_generic()
    }

    fn deserialize(&self, json: &JsonValue, _ty: &TypeDescriptor, _registry: &ConverterRegistry) -> Result<Value> {
        match json {
            JsonValue::Bool(b) => Ok(Value::Bool(*b)),
            other => Err(ConvertError::validation(json::expected("boolean", other))),
        }
    }

    fn serialize(&self, value: &Value, ty: &TypeDescriptor, _registry: &ConverterRegistry) -> Result<JsonValue> {
        match value {
            Value::Bool(b) => Ok(JsonValue::Bool(*b)),
            other => Err(value_mismatch(ty, other)),
        }
    }
}

/// Converter for one fixed-width integer type.
///
/// JSON numbers outside `[min, max]` and numbers with a fractional part are
/// rejected. A number written with an exponent or a zero fraction (`5.0`) is
/// accepted when its value is integral.
#[derive(Debug, Clone)]
pub struct IntegerConverter {
    name: Name,
    min: i64,
    max: i64,
}

impl IntegerConverter {
    pub fn new(name: impl Into<Name>, min: i64, max: i64) -> Self {
        IntegerConverter {
            name: name.into(),
            min,
            max,
        }
    }

    pub fn i8() -> Self {
        Self::new(names::I8, i8::MIN.into(), i8::MAX.into())
    }

    pub fn i16() -> Self {
        Self::new(names::I16, i16::MIN.into(), i16::MAX.into())
    }

    pub fn i32() -> Self {
        Self::new(names::I32, i32::MIN.into(), i32::MAX.into())
    }

    pub fn i64() -> Self {
        Self::new(names::I64, i64::MIN, i64::MAX)
    }

    fn in_range(&self, i: i64) -> bool {
        self.min <= i && i <= self.max
    }

    fn out_of_range(&self, json: &JsonValue) -> ConvertError {
        ConvertError::validation(format!(
            "value out of range for {}, found: {}",
            self.name,
            json::render(json)
        ))
    }
}

impl Converter for IntegerConverter {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        ty.name == self.name && !ty.is_generic()
    }

    fn deserialize(&self, json: &JsonValue, _ty: &TypeDescriptor, _registry: &ConverterRegistry) -> Result<Value> {
        let JsonValue::Number(n) = json else {
            return Err(ConvertError::validation(json::expected("integer", json)));
        };
        if let Some(i) = n.as_i64() {
            if self.in_range(i) {
                return Ok(Value::Int(i));
            }
            return Err(self.out_of_range(json));
        }
        if n.is_u64() {
            return Err(self.out_of_range(json));
        }
        match n.as_f64() {
            Some(x) if x.is_finite() && x.fract() == 0.0 => {
                // `max as f64` may round up (i64::MAX becomes 2^63), so the upper bound is exclusive.
                if x >= self.min as f64 && x < self.max as f64 + 1.0 {
                    Ok(Value::Int(x as i64))
                } else {
                    Err(self.out_of_range(json))
                }
            }
            _ => Err(ConvertError::validation(json::expected("integer", json))),
        }
    }

    fn serialize(&self, value: &Value, ty: &TypeDescriptor, _registry: &ConverterRegistry) -> Result<JsonValue> {
        match value {
            Value::Int(i) if self.in_range(*i) => Ok(JsonValue::Number(Number::from(*i))),
            Value::Int(i) => Err(ConvertError::ValueMismatch {
                expected: ty.clone(),
                found: format!("out-of-range integer {}", i),
            }),
            other => Err(value_mismatch(ty, other)),
        }
    }
}

/// Converter for `f32` or `f64`.
#[derive(Debug, Clone)]
pub struct FloatConverter {
    name: Name,
    single_precision: bool,
}

impl FloatConverter {
    pub fn f32() -> Self {
        FloatConverter {
            name: Name::from(names::F32),
            single_precision: true,
        }
    }

    pub fn f64() -> Self {
        FloatConverter {
            name: Name::from(names::F64),
            single_precision: false,
        }
    }
}

impl Converter for FloatConverter {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        ty.name == self.name && !ty.is_generic()
    }

    fn deserialize(&self, json: &JsonValue, _ty: &TypeDescriptor, _registry: &ConverterRegistry) -> Result<Value> {
        let Some(x) = json.as_f64() else {
            return Err(ConvertError::validation(json::expected("number", json)));
        };
        if self.single_precision && !(x as f32).is_finite() {
            return Err(ConvertError::validation(format!(
                "value out of range for {}, found: {}",
                self.name,
                json::render(json)
            )));
        }
        Ok(Value::Float(x))
    }

    fn serialize(&self, value: &Value, ty: &TypeDescriptor, _registry: &ConverterRegistry) -> Result<JsonValue> {
        match value {
            Value::Float(x) => Number::from_f64(*x)
                .map(JsonValue::Number)
                .ok_or(ConvertError::NonFiniteFloat(*x)),
            other => Err(value_mismatch(ty, other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StringConverter;

impl Converter for StringConverter {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        ty.is(names::STRING) && !ty.is_generic()
    }

    fn deserialize(&self, json: &JsonValue, _ty: &TypeDescriptor, _registry: &ConverterRegistry) -> Result<Value> {
        match json {
            JsonValue::String(s) => Ok(Value::String(s.clone())),
            other => Err(ConvertError::validation(json::expected("string", other))),
        }
    }

    fn serialize(&self, value: &Value, ty: &TypeDescriptor, _registry: &ConverterRegistry) -> Result<JsonValue> {
        match value {
            Value::String(s) => Ok(JsonValue::String(s.clone())),
            other => Err(value_mismatch(ty, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryBuilder;
    use rstest::rstest;
    use serde_json::json;

    fn registry() -> ConverterRegistry {
        RegistryBuilder::new().seal()
    }

    fn message(err: ConvertError) -> String {
        let flat = err.flattened();
        assert_eq!(flat.len(), 1, "expected exactly one error, got {:?}", flat);
        assert_eq!(flat[0].path_string(), "");
        flat[0].message.clone()
    }

    #[rstest]
    #[case(json!(0), 0)]
    #[case(json!(-2147483648i64), i32::MIN as i64)]
    #[case(json!(2147483647), i32::MAX as i64)]
    #[case(json!(5.0), 5)]
    fn test_i32_accepts(#[case] input: JsonValue, #[case] expected: i64) {
        let ty = TypeDescriptor::i32();
        let value = IntegerConverter::i32().deserialize(&input, &ty, &registry()).unwrap();
        assert_eq!(value, Value::Int(expected));
    }

    #[rstest]
    #[case(json!(2147483648i64), "value out of range for i32, found: 2147483648")]
    #[case(json!(18446744073709551615u64), "value out of range for i32, found: 18446744073709551615")]
    #[case(json!(1.5), "expected integer, found: 1.5")]
    #[case(json!("foo"), r#"expected integer, found: "foo""#)]
    #[case(json!(null), "expected integer, found: null")]
    #[case(json!(true), "expected integer, found: true")]
    #[case(json!([]), "expected integer, found: []")]
    #[case(json!({}), "expected integer, found: {}")]
    fn test_i32_rejects(#[case] input: JsonValue, #[case] expected: &str) {
        let ty = TypeDescriptor::i32();
        let err = IntegerConverter::i32().deserialize(&input, &ty, &registry()).unwrap_err();
        assert_eq!(message(err), expected);
    }

    #[rstest]
    #[case(json!(9223372036854775808.0f64))]
    #[case(json!(1e19))]
    #[case(json!(-9.3e18))]
    fn test_i64_rejects_float_overflow(#[case] input: JsonValue) {
        let ty = TypeDescriptor::i64();
        let err = IntegerConverter::i64().deserialize(&input, &ty, &registry()).unwrap_err();
        assert!(message(err).starts_with("value out of range for i64, found: "));
    }

    #[test]
    fn test_i64_accepts_float_at_lower_bound() {
        let ty = TypeDescriptor::i64();
        let value = IntegerConverter::i64()
            .deserialize(&json!(-9223372036854775808.0f64), &ty, &registry())
            .unwrap();
        assert_eq!(value, Value::Int(i64::MIN));
    }

    #[test]
    fn test_i8_range() {
        let ty = TypeDescriptor::i8();
        let converter = IntegerConverter::i8();
        assert!(converter.deserialize(&json!(127), &ty, &registry()).is_ok());
        assert!(converter.deserialize(&json!(128), &ty, &registry()).is_err());
        assert!(converter.serialize(&Value::Int(300), &ty, &registry()).is_err());
    }

    #[test]
    fn test_integer_supports_only_its_width() {
        let converter = IntegerConverter::i32();
        assert!(converter.supports(&TypeDescriptor::i32()));
        assert!(!converter.supports(&TypeDescriptor::i64()));
        assert!(!converter.supports(&TypeDescriptor::new("i32", vec![TypeDescriptor::string()])));
    }

    #[test]
    fn test_boolean() {
        let ty = TypeDescriptor::bool();
        let reg = registry();
        assert_eq!(BooleanConverter.deserialize(&json!(true), &ty, &reg).unwrap(), Value::Bool(true));
        assert_eq!(BooleanConverter.serialize(&Value::Bool(false), &ty, &reg).unwrap(), json!(false));
        let err = BooleanConverter.deserialize(&json!("true"), &ty, &reg).unwrap_err();
        assert_eq!(message(err), r#"expected boolean, found: "true""#);
    }

    #[test]
    fn test_string() {
        let ty = TypeDescriptor::string();
        let reg = registry();
        assert_eq!(StringConverter.deserialize(&json!("foo"), &ty, &reg).unwrap(), Value::string("foo"));
        assert_eq!(StringConverter.serialize(&Value::string("foo"), &ty, &reg).unwrap(), json!("foo"));
        let err = StringConverter.deserialize(&json!(12), &ty, &reg).unwrap_err();
        assert_eq!(message(err), "expected string, found: 12");
    }

    #[test]
    fn test_float() {
        let ty = TypeDescriptor::f64();
        let reg = registry();
        let converter = FloatConverter::f64();
        assert_eq!(converter.deserialize(&json!(1.25), &ty, &reg).unwrap(), Value::Float(1.25));
        assert_eq!(converter.deserialize(&json!(3), &ty, &reg).unwrap(), Value::Float(3.0));
        assert_eq!(converter.serialize(&Value::Float(1.25), &ty, &reg).unwrap(), json!(1.25));
        assert!(matches!(
            converter.serialize(&Value::Float(f64::NAN), &ty, &reg),
            Err(ConvertError::NonFiniteFloat(_))
        ));
        let err = converter.deserialize(&json!("1.0"), &ty, &reg).unwrap_err();
        assert_eq!(message(err), r#"expected number, found: "1.0""#);
    }

    #[test]
    fn test_f32_range() {
        let ty = TypeDescriptor::f32();
        let err = FloatConverter::f32().deserialize(&json!(1e300), &ty, &registry()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_unit_requires_null() {
        let ty = TypeDescriptor::unit();
        let reg = registry();
        assert_eq!(UnitConverter.deserialize(&json!(null), &ty, &reg).unwrap(), Value::Unit);
        assert_eq!(UnitConverter.serialize(&Value::Unit, &ty, &reg).unwrap(), json!(null));
        let err = UnitConverter.deserialize(&json!(0), &ty, &reg).unwrap_err();
        assert_eq!(message(err), "expected null, found: 0");
    }

    #[test]
    fn test_serialize_null_is_programming_error() {
        let reg = registry();
        let err = StringConverter.serialize(&Value::Null, &TypeDescriptor::string(), &reg).unwrap_err();
        assert!(matches!(err, ConvertError::NullArgument(_)));
        let err = BooleanConverter.serialize(&Value::Null, &TypeDescriptor::bool(), &reg).unwrap_err();
        assert!(matches!(err, ConvertError::NullArgument(_)));
    }

    #[test]
    fn test_serialize_wrong_variant() {
        let err = StringConverter
            .serialize(&Value::Int(1), &TypeDescriptor::string(), &registry())
            .unwrap_err();
        assert_eq!(err.to_string(), "cannot serialize integer value as String");
    }
}
