//! Error types for estate

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using estate's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Estate error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {message}")]
    Validation { message: String },

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Data file is corrupt: {path}: {message}")]
    CorruptData { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Error::NotFound {
            entity,
            key: key.into(),
        }
    }
}
