//! Converters registered by default.
//!
//! [`defaults`] lists them in registration order. They only need to be
//! registered by hand after [`crate::RegistryBuilder::clear`].

pub mod json_passthrough;
pub mod list;
pub mod optional;
pub mod scalar;
pub mod type_wrapper;

use crate::converter::Converter;
use std::sync::Arc;

pub use json_passthrough::JsonPassthroughConverter;
pub use list::ListConverter;
pub use optional::OptionalConverter;
pub use scalar::{BooleanConverter, FloatConverter, IntegerConverter, StringConverter, UnitConverter};
pub use type_wrapper::TypeWrapperConverter;

/// The default converters, in registration order.
pub fn defaults() -> Vec<Arc<dyn Converter>> {
    vec![
        Arc::new(UnitConverter),
        Arc::new(BooleanConverter),
        Arc::new(IntegerConverter::i8()),
        Arc::new(IntegerConverter::i16()),
        Arc::new(IntegerConverter::i32()),
        Arc::new(IntegerConverter::i64()),
        Arc::new(FloatConverter::f32()),
        Arc::new(FloatConverter::f64()),
        Arc::new(StringConverter),
        Arc::new(JsonPassthroughConverter),
        Arc::new(ListConverter),
        Arc::new(OptionalConverter),
        Arc::new(TypeWrapperConverter),
    ]
}
