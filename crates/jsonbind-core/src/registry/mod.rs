//! Converter registry.
//!
//! A registry goes through two phases. While it is a [`RegistryBuilder`],
//! converters and record shapes are registered from a single thread.
//! [`RegistryBuilder::seal`] turns it into a [`ConverterRegistry`], which only
//! looks converters up and can be shared freely between threads.
//!
//! Lookups go through a shared cache. On a miss the registered converters are
//! scanned in registration order; failing that, a converter is synthesized
//! for a record type the catalog describes.

pub mod proxy;

mod resolution;

use crate::builtin;
use crate::config::RegistryConfig;
use crate::converter::Converter;
use crate::error::{ConvertError, Result};
use crate::json::{self, JsonValue};
use crate::naming::Name;
use crate::record::{Introspect, RecordCatalog, RecordConverter, RecordShape};
use crate::types::TypeDescriptor;
use crate::value::Value;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

pub use proxy::ProxyConverter;
use resolution::Resolution;

/// What to do when more than one registered converter supports a type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Use the converter registered first.
    #[default]
    FirstMatch,
    /// Fail the lookup with [`ConvertError::AmbiguousConverter`].
    Reject,
}

/// A registry in its configuration phase.
pub struct RegistryBuilder {
    converters: Vec<Arc<dyn Converter>>,
    catalog: RecordCatalog,
    introspectors: Vec<Arc<dyn Introspect>>,
    overlap: OverlapPolicy,
}

impl RegistryBuilder {
    /// A builder pre-loaded with the [default converters](builtin::defaults).
    pub fn new() -> Self {
        let mut builder = Self::empty();
        builder.converters.extend(builtin::defaults());
        builder
    }

    /// A builder without any converters.
    pub fn empty() -> Self {
        RegistryBuilder {
            converters: Vec::new(),
            catalog: RecordCatalog::new(),
            introspectors: Vec::new(),
            overlap: OverlapPolicy::default(),
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        let mut builder = if config.registry.builtins {
            Self::new()
        } else {
            Self::empty()
        };
        builder.overlap_policy(config.registry.overlap);
        builder
    }

    /// Adds a converter. Converters are tried in registration order.
    pub fn register(&mut self, converter: impl Converter + 'static) -> &mut Self {
        self.register_shared(Arc::new(converter))
    }

    pub fn register_shared(&mut self, converter: Arc<dyn Converter>) -> &mut Self {
        self.converters.push(converter);
        self
    }

    /// Describes a record type so a converter can be synthesized for it.
    pub fn register_record(&mut self, shape: impl RecordShape + 'static) -> &mut Self {
        self.catalog.register(shape);
        self
    }

    /// Adds an external source of record shapes, consulted after the
    /// registered ones.
    pub fn with_introspector(&mut self, introspector: Arc<dyn Introspect>) -> &mut Self {
        self.introspectors.push(introspector);
        self
    }

    /// Removes every registered converter, the defaults included. Record
    /// shapes are kept.
    pub fn clear(&mut self) -> &mut Self {
        self.converters.clear();
        self
    }

    pub fn overlap_policy(&mut self, policy: OverlapPolicy) -> &mut Self {
        self.overlap = policy;
        self
    }

    /// Ends the configuration phase.
    pub fn seal(self) -> ConverterRegistry {
        info!(
            "Sealing converter registry: {} converters, {} record shapes, {} introspectors",
            self.converters.len(),
            self.catalog.len(),
            self.introspectors.len()
        );
        ConverterRegistry {
            converters: self.converters,
            catalog: self.catalog,
            introspectors: self.introspectors,
            overlap: self.overlap,
            cache: DashMap::new(),
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A sealed registry.
///
/// Resolution is safe to call from many threads at once. Two threads missing
/// the cache for the same type may both build a converter for it; the first
/// one published is kept and both are equivalent.
pub struct ConverterRegistry {
    converters: Vec<Arc<dyn Converter>>,
    catalog: RecordCatalog,
    introspectors: Vec<Arc<dyn Introspect>>,
    overlap: OverlapPolicy,
    cache: DashMap<TypeDescriptor, Arc<dyn Converter>>,
}

impl ConverterRegistry {
    /// Whether [`ConverterRegistry::resolve`] can be expected to succeed for
    /// `ty` (field types of a synthesized record are only checked by resolve).
    pub fn supports(&self, ty: &TypeDescriptor) -> bool {
        if self.cache.contains_key(ty) {
            return true;
        }
        if self.converters.iter().any(|converter| converter.supports(ty)) {
            return true;
        }
        self.record_shape(ty.name)
            .is_some_and(|shape| shape.type_parameters().len() == ty.args.len())
    }

    /// Returns the converter for `ty`, building and caching it on first use.
    pub fn resolve(&self, ty: &TypeDescriptor) -> Result<Arc<dyn Converter>> {
        if let Some(converter) = self.cached(ty) {
            trace!("Converter cache hit for {}", ty);
            return Ok(converter);
        }

        let mut resolution = Resolution::default();
        let converter = self.resolve_in(ty, &mut resolution)?;

        let completed = resolution.into_completed();
        debug!("Publishing {} converter(s) resolved for {}", completed.len(), ty);
        for (resolved_ty, resolved) in completed {
            self.cache.entry(resolved_ty).or_insert(resolved);
        }
        Ok(converter)
    }

    fn resolve_in(&self, ty: &TypeDescriptor, resolution: &mut Resolution) -> Result<Arc<dyn Converter>> {
        if let Some(converter) = resolution.get(ty) {
            return Ok(converter);
        }
        if let Some(converter) = self.cached(ty) {
            return Ok(converter);
        }
        if let Some(converter) = self.find_registered(ty)? {
            resolution.complete(ty, converter.clone());
            return Ok(converter);
        }

        let shape = self
            .record_shape(ty.name)
            .ok_or_else(|| ConvertError::NoConverterFound(ty.clone()))?;
        debug!("Synthesizing record converter for {}", ty);

        let placeholder = Arc::new(ProxyConverter::new(ty.clone()));
        resolution.install_placeholder(ty, placeholder.clone());
        let record = RecordConverter::build(ty, shape, |field_ty| self.resolve_in(field_ty, resolution))?;
        let converter: Arc<dyn Converter> = Arc::new(record);
        placeholder.redirect(converter.clone())?;
        resolution.complete(ty, converter.clone());
        Ok(converter)
    }

    fn cached(&self, ty: &TypeDescriptor) -> Option<Arc<dyn Converter>> {
        self.cache.get(ty).map(|entry| entry.value().clone())
    }

    /// First registered converter supporting `ty`, subject to the overlap policy.
    fn find_registered(&self, ty: &TypeDescriptor) -> Result<Option<Arc<dyn Converter>>> {
        let mut candidates = self.converters.iter().filter(|converter| converter.supports(ty));
        let Some(first) = candidates.next() else {
            return Ok(None);
        };
        let shadowed = candidates.count();
        if shadowed > 0 {
            match self.overlap {
                OverlapPolicy::Reject => {
                    return Err(ConvertError::AmbiguousConverter {
                        ty: ty.clone(),
                        candidates: shadowed + 1,
                    });
                }
                OverlapPolicy::FirstMatch => {
                    warn!(
                        "{} later converter(s) also support {}; using {:?}",
                        shadowed, ty, first
                    );
                }
            }
        }
        Ok(Some(first.clone()))
    }

    /// The shape registered for `name`, or the first one an introspector
    /// supplies.
    pub fn record_shape(&self, name: Name) -> Option<Arc<dyn RecordShape>> {
        self.catalog.record_shape(name).or_else(|| {
            self.introspectors
                .iter()
                .find_map(|introspector| introspector.record_shape(name))
        })
    }

    /// Number of cached converters.
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    /// Converts `json` into a value of type `ty`.
    pub fn deserialize(&self, json: &JsonValue, ty: &TypeDescriptor) -> Result<Value> {
        self.resolve(ty)?
            .deserialize(json, ty, self)
            .map_err(|err| match err {
                ConvertError::Validation(tree) => ConvertError::Validation(tree.or_invalid()),
                other => other,
            })
    }

    /// Converts `value` into JSON, choosing the converter by the value's
    /// runtime type.
    pub fn serialize(&self, value: &Value) -> Result<JsonValue> {
        if value.is_null() {
            return Err(ConvertError::NullArgument("value"));
        }
        let ty = value.runtime_type().ok_or_else(|| {
            ConvertError::MissingTypeInformation(format!(
                "{} value has no runtime type; wrap it in a TypeWrapper",
                value.kind()
            ))
        })?;
        self.serialize_as(value, &ty)
    }

    /// Converts `value` into JSON as an instance of `ty`.
    pub fn serialize_as(&self, value: &Value, ty: &TypeDescriptor) -> Result<JsonValue> {
        if value.is_null() {
            return Err(ConvertError::NullArgument("value"));
        }
        self.resolve(ty)?.serialize(value, ty, self)
    }

    /// Parses JSON text and converts it into a value of type `ty`.
    pub fn from_json_str(&self, text: &str, ty: &TypeDescriptor) -> Result<Value> {
        self.deserialize(&json::parse(text)?, ty)
    }

    pub fn to_json_string(&self, value: &Value) -> Result<String> {
        json::to_string(&self.serialize(value)?)
    }
}
