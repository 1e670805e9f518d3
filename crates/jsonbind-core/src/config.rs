//! Registry configuration
//!
//! Loads the `[registry]` table of a TOML file:
//!
//! ```toml
//! [registry]
//! builtins = true
//! overlap = "first-match"
//! ```

use crate::error::Result;
use crate::registry::OverlapPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub registry: RegistrySection,
}

/// The `[registry]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySection {
    /// Pre-load the default converters.
    #[serde(default = "default_builtins")]
    pub builtins: bool,
    #[serde(default)]
    pub overlap: OverlapPolicy,
}

fn default_builtins() -> bool {
    true
}

impl Default for RegistrySection {
    fn default() -> Self {
        RegistrySection {
            builtins: default_builtins(),
            overlap: OverlapPolicy::default(),
        }
    }
}

impl RegistryConfig {
    /// Load configuration from a file path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
