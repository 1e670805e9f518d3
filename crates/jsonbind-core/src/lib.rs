//! Type-directed JSON conversion.
//!
//! A [`ConverterRegistry`] resolves a [`Converter`] for a [`TypeDescriptor`],
//! either from the converters registered while configuring it or by
//! synthesizing one for a record type described in its catalog. Converting
//! untrusted JSON never stops at the first problem: every field is attempted
//! and all failures are reported as one [`ErrorTree`].

pub mod builtin;
pub mod config;
pub mod converter;
pub mod error;
pub mod error_tree;
pub mod json;
pub mod naming;
pub mod parse;
pub mod record;
pub mod registry;
pub mod types;
pub mod value;

// Re-export commonly used items for convenience
pub use converter::Converter;
pub use error::{ConvertError, Result};
pub use error_tree::{
    ErrorTree, FlattenedError, PathSegment, INVALID_VALUE, MISSING_PROPERTY, UNEXPECTED_PROPERTY,
};
pub use json::JsonValue;
pub use naming::{intern, resolve, Name, Word};
pub use record::{FieldShape, Introspect, RecordCatalog, RecordShape, StructuralRecord};
pub use registry::{ConverterRegistry, OverlapPolicy, RegistryBuilder};
pub use types::{TypeDescriptor, TypeExpr};
pub use value::{RecordValue, TypeWrapper, Value};
