//! The unit of (de)serialization logic.

use crate::error::{ConvertError, Result};
use crate::json::JsonValue;
use crate::registry::ConverterRegistry;
use crate::types::TypeDescriptor;
use crate::value::Value;
use std::fmt;

/// Converts between JSON and host values for the types it supports.
///
/// A converter may implement only one direction; the other keeps the default
/// implementation, which reports [`ConvertError::UnsupportedOperation`].
///
/// The sealed registry is passed to both directions so that composite
/// converters can resolve converters for their element types.
pub trait Converter: Send + Sync + fmt::Debug {
    /// Whether this converter handles `ty`.
    fn supports(&self, ty: &TypeDescriptor) -> bool;

    /// Converts `json` into a value of type `ty`.
    ///
    /// Bad input is reported as [`ConvertError::Validation`]; converters
    /// composing other converters must collect those rather than return on
    /// the first one.
    fn deserialize(&self, json: &JsonValue, ty: &TypeDescriptor, registry: &ConverterRegistry) -> Result<Value> {
        let _ = (json, registry);
        Err(ConvertError::UnsupportedOperation(format!(
            "{:?} cannot deserialize {}",
            self, ty
        )))
    }

    /// Converts `value`, an instance of `ty`, into JSON.
    fn serialize(&self, value: &Value, ty: &TypeDescriptor, registry: &ConverterRegistry) -> Result<JsonValue> {
        let _ = (value, registry);
        Err(ConvertError::UnsupportedOperation(format!(
            "{:?} cannot serialize {}",
            self, ty
        )))
    }
}

/// Rejects `Value::Null`, which no converter accepts for serialization.
pub(crate) fn require_non_null(value: &Value) -> Result<()> {
    if value.is_null() {
        return Err(ConvertError::NullArgument("value"));
    }
    Ok(())
}

/// The error for a value whose variant does not match the converter's type.
pub(crate) fn value_mismatch(ty: &TypeDescriptor, value: &Value) -> ConvertError {
    if value.is_null() {
        return ConvertError::NullArgument("value");
    }
    ConvertError::ValueMismatch {
        expected: ty.clone(),
        found: value.kind().to_string(),
    }
}
