//! Host-side values produced by deserialization and consumed by serialization.

use crate::json::JsonValue;
use crate::types::TypeDescriptor;
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A dynamically typed host value.
#[derive(Clone)]
pub enum Value {
    /// Absent instance. Only ever produced by calling code; serializing it is
    /// a programming error.
    Null,
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Opaque JSON embedded as-is.
    Json(JsonValue),
    List(Vec<Value>),
    Optional(Option<Box<Value>>),
    Record(RecordValue),
    /// A value paired with the type it must be serialized as.
    Wrapped(Box<TypeWrapper>),
    /// A value owned by a caller-registered converter.
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl Value {
    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    pub fn some(value: Value) -> Self {
        Value::Optional(Some(Box::new(value)))
    }

    pub fn none() -> Self {
        Value::Optional(None)
    }

    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Value::Opaque(Arc::new(value))
    }

    /// Wraps `value` so it is serialized as `ty` instead of its runtime type.
    pub fn wrap(value: Value, ty: TypeDescriptor) -> Self {
        Value::Wrapped(Box::new(TypeWrapper::new(value, ty)))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Unit => "unit",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Json(_) => "json",
            Value::List(_) => "list",
            Value::Optional(_) => "optional",
            Value::Record(_) => "record",
            Value::Wrapped(_) => "type wrapper",
            Value::Opaque(_) => "opaque",
        }
    }

    /// The type this value carries at runtime.
    ///
    /// Element types of lists and optionals are erased, and neither `Null`
    /// nor `Opaque` values know their type; use [`Value::wrap`] when the
    /// erased type is not enough to pick a converter.
    pub fn runtime_type(&self) -> Option<TypeDescriptor> {
        match self {
            Value::Null | Value::Opaque(_) => None,
            Value::Unit => Some(TypeDescriptor::unit()),
            Value::Bool(_) => Some(TypeDescriptor::bool()),
            Value::Int(_) => Some(TypeDescriptor::i64()),
            Value::Float(_) => Some(TypeDescriptor::f64()),
            Value::String(_) => Some(TypeDescriptor::string()),
            Value::Json(_) => Some(TypeDescriptor::json()),
            Value::List(_) => Some(TypeDescriptor::named(crate::types::names::LIST)),
            Value::Optional(_) => Some(TypeDescriptor::named(crate::types::names::OPTION)),
            Value::Record(record) => Some(record.ty.clone()),
            Value::Wrapped(_) => Some(TypeDescriptor::type_wrapper()),
        }
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_opaque<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Opaque(any) => any.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Unit, Value::Unit) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Json(a), Value::Json(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Optional(a), Value::Optional(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Wrapped(a), Value::Wrapped(b)) => a == b,
            // Opaque values have no structural equality; identity is all we know.
            (Value::Opaque(a), Value::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Unit => f.write_str("Unit"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Json(j) => f.debug_tuple("Json").field(j).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Optional(inner) => f.debug_tuple("Optional").field(inner).finish(),
            Value::Record(record) => record.fmt(f),
            Value::Wrapped(wrapper) => wrapper.fmt(f),
            Value::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<RecordValue> for Value {
    fn from(record: RecordValue) -> Self {
        Value::Record(record)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// An instance of a structural record type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    pub ty: TypeDescriptor,
    pub fields: IndexMap<String, Value>,
}

impl RecordValue {
    pub fn new(ty: TypeDescriptor) -> Self {
        RecordValue {
            ty,
            fields: IndexMap::new(),
        }
    }

    /// Builder-style field insertion, in declaration order.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// A value paired with an explicit type descriptor.
///
/// Only meaningful for serialization: when the runtime type of a value has
/// lost its type arguments, wrapping it restores them.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeWrapper {
    pub value: Value,
    pub ty: TypeDescriptor,
}

impl TypeWrapper {
    pub fn new(value: Value, ty: TypeDescriptor) -> Self {
        TypeWrapper { value, ty }
    }
}
