//! Error types for JSON conversion.
//!
//! Only [`ConvertError::Validation`] describes bad input; it carries the full
//! [`ErrorTree`] and is expected whenever untrusted JSON is converted. Every
//! other variant reports a mistake in the calling code or in the registry
//! configuration and is returned as soon as it is detected.

use crate::error_tree::{ErrorTree, FlattenedError};
use crate::naming::Name;
use crate::types::TypeDescriptor;
use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Main error type for conversion operations
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("no converter found for type: {0}")]
    NoConverterFound(TypeDescriptor),

    #[error("no from-string parser found for type: {0}")]
    NoParserFound(TypeDescriptor),

    #[error("validation failed:\n{0}")]
    Validation(ErrorTree),

    #[error("{0} must not be null")]
    NullArgument(&'static str),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("{candidates} converters support type {ty}")]
    AmbiguousConverter { ty: TypeDescriptor, candidates: usize },

    #[error("type {ty} expects {expected} type argument(s), found {found}")]
    ArityMismatch {
        ty: TypeDescriptor,
        expected: usize,
        found: usize,
    },

    #[error("record {record} uses unbound type variable {variable}")]
    UnboundTypeVariable { record: Name, variable: Name },

    #[error("placeholder converter for {0} used before its target was set")]
    UnresolvedProxy(TypeDescriptor),

    #[error("cannot serialize {found} value as {expected}")]
    ValueMismatch { expected: TypeDescriptor, found: String },

    #[error("non-finite float cannot be represented in JSON: {0}")]
    NonFiniteFloat(f64),

    #[error("missing type information: {0}")]
    MissingTypeInformation(String),

    #[error("invalid value for record {record}: {reason}")]
    InvalidRecordValue { record: TypeDescriptor, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ConvertError {
    /// A validation failure with a single message about the value itself.
    pub fn validation(message: impl Into<String>) -> Self {
        ConvertError::Validation(ErrorTree::message(message))
    }

    /// True if this error describes bad input rather than a programming error.
    pub fn is_validation(&self) -> bool {
        matches!(self, ConvertError::Validation(_))
    }

    pub fn error_tree(&self) -> Option<&ErrorTree> {
        match self {
            ConvertError::Validation(tree) => Some(tree),
            _ => None,
        }
    }

    /// The flattened validation errors, or an empty list for other errors.
    pub fn flattened(&self) -> Vec<FlattenedError> {
        self.error_tree().map(ErrorTree::flatten).unwrap_or_default()
    }
}
