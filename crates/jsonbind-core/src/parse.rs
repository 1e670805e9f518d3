//! Parsing values from plain text.
//!
//! Path parameters and querystring values arrive as strings rather than JSON.
//! A [`ParserRegistry`] picks a [`FromStringParser`] for the target type the
//! same way the converter registry picks a converter: first registered match,
//! cached per type.

use crate::error::{ConvertError, Result};
use crate::types::{names, TypeDescriptor};
use crate::value::Value;
use dashmap::DashMap;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::trace;

/// Turns text into a [`Value`] of a supported type.
pub trait FromStringParser: Send + Sync + Debug {
    fn supports(&self, ty: &TypeDescriptor) -> bool;

    /// Fails with a validation error carrying a single root message when
    /// `text` is malformed.
    fn parse(&self, text: &str, ty: &TypeDescriptor) -> Result<Value>;
}

fn malformed(kind: &str, text: &str) -> ConvertError {
    ConvertError::validation(format!("expected {kind}, found: {text:?}"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanParser;

impl FromStringParser for BooleanParser {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        ty.is(names::BOOL)
    }

    fn parse(&self, text: &str, _ty: &TypeDescriptor) -> Result<Value> {
        match text {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(malformed("boolean", text)),
        }
    }
}

/// Parses decimal integers of one width.
#[derive(Debug, Clone, Copy)]
pub struct IntegerParser {
    name: &'static str,
    min: i64,
    max: i64,
}

impl IntegerParser {
    pub fn i8() -> Self {
        IntegerParser {
            name: names::I8,
            min: i8::MIN.into(),
            max: i8::MAX.into(),
        }
    }

    pub fn i16() -> Self {
        IntegerParser {
            name: names::I16,
            min: i16::MIN.into(),
            max: i16::MAX.into(),
        }
    }

    pub fn i32() -> Self {
        IntegerParser {
            name: names::I32,
            min: i32::MIN.into(),
            max: i32::MAX.into(),
        }
    }

    pub fn i64() -> Self {
        IntegerParser {
            name: names::I64,
            min: i64::MIN,
            max: i64::MAX,
        }
    }
}

impl FromStringParser for IntegerParser {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        ty.is(self.name)
    }

    fn parse(&self, text: &str, _ty: &TypeDescriptor) -> Result<Value> {
        let value: i64 = text.parse().map_err(|_| malformed("integer", text))?;
        if value < self.min || value > self.max {
            return Err(ConvertError::validation(format!(
                "value out of range for {}, found: {}",
                self.name, value
            )));
        }
        Ok(Value::Int(value))
    }
}

/// Parses finite decimal numbers.
#[derive(Debug, Clone, Copy)]
pub struct FloatParser {
    name: &'static str,
}

impl FloatParser {
    pub fn f32() -> Self {
        FloatParser { name: names::F32 }
    }

    pub fn f64() -> Self {
        FloatParser { name: names::F64 }
    }
}

impl FromStringParser for FloatParser {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        ty.is(self.name)
    }

    fn parse(&self, text: &str, _ty: &TypeDescriptor) -> Result<Value> {
        let value = if self.name == names::F32 {
            text.parse::<f32>().map(f64::from)
        } else {
            text.parse::<f64>()
        };
        match value {
            Ok(value) if value.is_finite() => Ok(Value::Float(value)),
            _ => Err(malformed("number", text)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StringParser;

impl FromStringParser for StringParser {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        ty.is(names::STRING)
    }

    fn parse(&self, text: &str, _ty: &TypeDescriptor) -> Result<Value> {
        Ok(Value::string(text))
    }
}

/// Selects parsers by type.
///
/// Registration needs `&mut self`, so parsers can only be added before the
/// registry is shared.
pub struct ParserRegistry {
    parsers: Vec<Arc<dyn FromStringParser>>,
    cache: DashMap<TypeDescriptor, Arc<dyn FromStringParser>>,
}

impl ParserRegistry {
    /// A registry with the default parsers for `bool`, the integer and float
    /// widths and `String`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry
            .register(BooleanParser)
            .register(IntegerParser::i8())
            .register(IntegerParser::i16())
            .register(IntegerParser::i32())
            .register(IntegerParser::i64())
            .register(FloatParser::f32())
            .register(FloatParser::f64())
            .register(StringParser);
        registry
    }

    pub fn empty() -> Self {
        ParserRegistry {
            parsers: Vec::new(),
            cache: DashMap::new(),
        }
    }

    pub fn register(&mut self, parser: impl FromStringParser + 'static) -> &mut Self {
        self.parsers.push(Arc::new(parser));
        self
    }

    /// Removes all parsers, the defaults included.
    pub fn clear(&mut self) -> &mut Self {
        self.parsers.clear();
        self.cache.clear();
        self
    }

    pub fn supports(&self, ty: &TypeDescriptor) -> bool {
        self.cache.contains_key(ty) || self.parsers.iter().any(|parser| parser.supports(ty))
    }

    pub fn resolve(&self, ty: &TypeDescriptor) -> Result<Arc<dyn FromStringParser>> {
        if let Some(parser) = self.cache.get(ty) {
            trace!("Parser cache hit for {}", ty);
            return Ok(parser.value().clone());
        }
        let parser = self
            .parsers
            .iter()
            .find(|parser| parser.supports(ty))
            .cloned()
            .ok_or_else(|| ConvertError::NoParserFound(ty.clone()))?;
        self.cache.entry(ty.clone()).or_insert(parser.clone());
        Ok(parser)
    }

    pub fn parse(&self, text: &str, ty: &TypeDescriptor) -> Result<Value> {
        self.resolve(ty)?.parse(text, ty)
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
