//! Configuration for the layout engine

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::types::MAX_SIZE;

/// Errors that can occur when loading an engine configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration options for the layout graph
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Extent treated as unbounded
    pub max_size: f64,

    /// Regroup and resize an axis that has no aligned grid
    pub compress_fallback: bool,

    /// Decimal places kept in percentage sizing tokens, at most 15 take effect
    pub percent_precision: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_size: MAX_SIZE,
            compress_fallback: true,
            percent_precision: 4,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extent treated as unbounded
    pub fn with_max_size(mut self, max_size: f64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Enable or disable the compression fallback
    pub fn with_compress_fallback(mut self, enabled: bool) -> Self {
        self.compress_fallback = enabled;
        self
    }

    /// Set the number of decimals kept in percentages
    pub fn with_percent_precision(mut self, precision: u32) -> Self {
        self.percent_precision = precision;
        self
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a configuration from a TOML string; missing keys keep defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        log::debug!("engine configuration: {:?}", config);
        Ok(config)
    }
}
