use crate::error::{ConvertError, Result};
use crate::naming::Name;
use crate::types::{TypeDescriptor, TypeExpr};
use crate::value::{RecordValue, Value};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A declared record field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldShape {
    /// Both the JSON key and the path segment in error reports.
    pub name: String,
    /// Declared type; may mention the record's type parameters.
    pub ty: TypeExpr,
}

impl FieldShape {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeExpr>) -> Self {
        FieldShape {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Describes one record type: a fixed, ordered set of named, typed fields
/// plus a constructor taking the field values in that order.
pub trait RecordShape: Send + Sync + fmt::Debug {
    /// Nominal name the record is looked up by.
    fn name(&self) -> Name;

    fn type_parameters(&self) -> &[Name];

    /// Fields in declaration order.
    fn fields(&self) -> &[FieldShape];

    /// Builds an instance of `ty` from field values in declaration order.
    fn construct(&self, ty: &TypeDescriptor, fields: Vec<Value>) -> Result<Value>;

    /// Takes an instance of `ty` apart into field values in declaration order.
    fn field_values<'a>(&self, ty: &TypeDescriptor, value: &'a Value) -> Result<Vec<Cow<'a, Value>>>;
}

/// Supplies record shapes by nominal name.
pub trait Introspect: Send + Sync {
    fn record_shape(&self, name: Name) -> Option<Arc<dyn RecordShape>>;
}

/// A record whose instances are [`RecordValue`]s.
///
/// ```rust,ignore
/// // record Inner<T>(T best, List<T> others)
/// let inner = StructuralRecord::new("Inner")
///     .param("T")
///     .field("best", TypeExpr::variable("T"))
///     .field("others", TypeExpr::reference("List", vec![TypeExpr::variable("T")]));
/// ```
#[derive(Debug, Clone)]
pub struct StructuralRecord {
    name: Name,
    params: Vec<Name>,
    fields: Vec<FieldShape>,
}

impl StructuralRecord {
    pub fn new(name: impl Into<Name>) -> Self {
        StructuralRecord {
            name: name.into(),
            params: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<Name>) -> Self {
        self.params.push(name.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, ty: impl Into<TypeExpr>) -> Self {
        self.fields.push(FieldShape::new(name, ty));
        self
    }

    fn invalid(&self, ty: &TypeDescriptor, reason: String) -> ConvertError {
        ConvertError::InvalidRecordValue {
            record: ty.clone(),
            reason,
        }
    }
}

impl RecordShape for StructuralRecord {
    fn name(&self) -> Name {
        self.name
    }

    fn type_parameters(&self) -> &[Name] {
        &self.params
    }

    fn fields(&self) -> &[FieldShape] {
        &self.fields
    }

    fn construct(&self, ty: &TypeDescriptor, fields: Vec<Value>) -> Result<Value> {
        if fields.len() != self.fields.len() {
            return Err(self.invalid(
                ty,
                format!("expected {} field values, got {}", self.fields.len(), fields.len()),
            ));
        }
        let fields = self
            .fields
            .iter()
            .map(|field| field.name.clone())
            .zip(fields)
            .collect();
        Ok(Value::Record(RecordValue {
            ty: ty.clone(),
            fields,
        }))
    }

    fn field_values<'a>(&self, ty: &TypeDescriptor, value: &'a Value) -> Result<Vec<Cow<'a, Value>>> {
        let Value::Record(record) = value else {
            return Err(self.invalid(ty, format!("expected a record value, found {}", value.kind())));
        };
        if record.ty.name != self.name {
            return Err(self.invalid(ty, format!("value is an instance of {}", record.ty)));
        }
        if let Some(extra) = record
            .fields
            .keys()
            .find(|name| !self.fields.iter().any(|field| &field.name == *name))
        {
            return Err(self.invalid(ty, format!("undeclared field {}", extra)));
        }
        self.fields
            .iter()
            .map(|field| {
                record
                    .fields
                    .get(&field.name)
                    .map(Cow::Borrowed)
                    .ok_or_else(|| self.invalid(ty, format!("missing field {}", field.name)))
            })
            .collect()
    }
}

/// Record shapes registered by name.
#[derive(Debug, Clone, Default)]
pub struct RecordCatalog {
    shapes: HashMap<Name, Arc<dyn RecordShape>>,
}

impl RecordCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `shape`, replacing any shape registered under the same name.
    pub fn register(&mut self, shape: impl RecordShape + 'static) {
        self.register_shared(Arc::new(shape));
    }

    pub fn register_shared(&mut self, shape: Arc<dyn RecordShape>) {
        self.shapes.insert(shape.name(), shape);
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Introspect for RecordCatalog {
    fn record_shape(&self, name: Name) -> Option<Arc<dyn RecordShape>> {
        self.shapes.get(&name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> StructuralRecord {
        StructuralRecord::new("Record")
            .field("myInt", TypeDescriptor::i32())
            .field("myString", TypeDescriptor::string())
    }

    #[test]
    fn test_construct_and_take_apart() {
        let shape = record();
        let ty = TypeDescriptor::named("Record");
        let value = shape
            .construct(&ty, vec![Value::Int(123), Value::string("foo")])
            .unwrap();
        assert_eq!(
            value,
            Value::Record(RecordValue::new(ty.clone()).with("myInt", 123).with("myString", "foo"))
        );

        let parts = shape.field_values(&ty, &value).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(*parts[0], Value::Int(123));
        assert_eq!(*parts[1], Value::string("foo"));
    }

    #[test]
    fn test_field_values_rejects_incomplete_record() {
        let shape = record();
        let ty = TypeDescriptor::named("Record");
        let value = Value::Record(RecordValue::new(ty.clone()).with("myInt", 1));
        let err = shape.field_values(&ty, &value).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for record Record: missing field myString");
    }

    #[test]
    fn test_field_values_rejects_other_record() {
        let shape = record();
        let ty = TypeDescriptor::named("Record");
        let value = Value::Record(RecordValue::new(TypeDescriptor::named("Other")));
        assert!(shape.field_values(&ty, &value).is_err());
    }

    #[test]
    fn test_catalog_lookup() {
        let mut catalog = RecordCatalog::new();
        catalog.register(record());
        assert_eq!(catalog.len(), 1);
        assert!(catalog.record_shape(Name::from("Record")).is_some());
        assert!(catalog.record_shape(Name::from("record")).is_none());
    }
}
