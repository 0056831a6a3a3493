//! Loading of world parameters.
//!
//! Each world variant has a plain serde struct with defaults equal to the
//! values of the original game. Parameters can be overridden from JSON;
//! missing fields keep their default.

use serde::de::DeserializeOwned;
use std::path::Path;

/// Errors that can occur when loading world parameters.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse JSON content.
    #[error("failed to parse config JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// The parameters describe an impossible world.
    #[error("invalid parameter `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Parameters of a world variant.
pub trait WorldConfig: DeserializeOwned + Default {
    /// Check that the parameters describe a playable world.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Parse parameters from a JSON string and validate them.
    fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read parameters from a JSON file and validate them.
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

/// Require `value > 0`.
pub(crate) fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

/// Require `low < high`.
pub(crate) fn ordered(field: &'static str, low: f64, high: f64) -> Result<(), ConfigError> {
    if low < high {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("lower bound {low} must be below upper bound {high}"),
        ))
    }
}
