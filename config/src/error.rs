//! Error types for loading configuration.

use thiserror::Error;

/// Errors that can occur while loading a configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The literal JSON could not be parsed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The configuration file could not be parsed.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
