//! Error types for ledgerweb-config

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid YAML format: {message}")]
    InvalidYaml { message: String },

    #[error("Invalid field value: {field} - {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("IO error reading config")]
    IoError(#[from] std::io::Error),
}

/// Result type with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
