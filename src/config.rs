//! Generator configuration
//!
//! Defaults target Realm: companions are named `Realm<Name>`, extend
//! `io.realm.RealmObject` and use `io.realm.annotations.{PrimaryKey, Ignore}`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::FormatConfig;
use crate::frontend::decl::ClassName;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid generator config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Prepended to the flattened declaration name
    pub prefix: String,
    /// Superclass of every companion
    pub base_class: ClassName,
    pub primary_key_marker: ClassName,
    pub ignore_marker: ClassName,
    /// Entity-level marker on source declarations
    pub entity_marker: ClassName,
    /// Field-level exclusion marker on source declarations
    pub transient_marker: ClassName,
    pub format: FormatConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            prefix: "Realm".to_string(),
            base_class: ClassName::new("io.realm", "RealmObject"),
            primary_key_marker: ClassName::new("io.realm.annotations", "PrimaryKey"),
            ignore_marker: ClassName::new("io.realm.annotations", "Ignore"),
            entity_marker: ClassName::new("com.realm.annotation.api", "Entity"),
            transient_marker: ClassName::new("com.realm.annotation.api", "Transient"),
            format: FormatConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_base_class(mut self, base_class: ClassName) -> Self {
        self.base_class = base_class;
        self
    }

    pub fn with_markers(mut self, primary_key: ClassName, ignore: ClassName) -> Self {
        self.primary_key_marker = primary_key;
        self.ignore_marker = ignore;
        self
    }

    pub fn with_format(mut self, format: FormatConfig) -> Self {
        self.format = format;
        self
    }
}
