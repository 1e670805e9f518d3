//! Structural record types.
//!
//! The engine does not inspect host types itself. A [`RecordShape`] describes
//! a record's type parameters, its ordered fields and how to build and take
//! apart an instance; an [`Introspect`] implementation hands shapes to the
//! registry, which turns them into [`RecordConverter`]s on first use.

pub mod converter;
pub mod shape;

pub use converter::RecordConverter;
pub use shape::{FieldShape, Introspect, RecordCatalog, RecordShape, StructuralRecord};
