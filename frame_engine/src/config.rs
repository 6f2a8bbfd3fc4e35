//! Knowledge base configuration, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Settings for a knowledge base instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KbConfig {
    /// Create a missing class when a link names it.
    pub auto_vivify: bool,

    /// Built-in spoilage hook.
    pub spoilage: SpoilageConfig,
}

impl Default for KbConfig {
    fn default() -> Self {
        Self {
            auto_vivify: true,
            spoilage: SpoilageConfig::default(),
        }
    }
}

impl KbConfig {
    /// Parse a configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// Names used by the spoilage hook.
///
/// Updating `day_slot` on a frame derived from `calendar_class` ages every
/// instance derived from `spoilable_class` by one day. Names are matched
/// exactly, and the lexer upper-cases input, so they are upper case here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpoilageConfig {
    pub enabled: bool,
    pub calendar_class: String,
    pub day_slot: String,
    pub spoilable_class: String,
    pub lifespan_slot: String,
    pub spoiled_slot: String,
    pub spoiled_on_slot: String,
}

impl Default for SpoilageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            calendar_class: "CALENDAR".to_string(),
            day_slot: "DAY".to_string(),
            spoilable_class: "FOOD".to_string(),
            lifespan_slot: "LIFESPAN".to_string(),
            spoiled_slot: "SPOILED".to_string(),
            spoiled_on_slot: "SPOILED_ON".to_string(),
        }
    }
}
