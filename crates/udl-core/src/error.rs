//! Error types for udl-core
//!
//! Centralized error handling using `thiserror` for ergonomic error definitions.

use thiserror::Error;

pub use crate::storage::StorageError;

/// Main error type for udl-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Persistent storage failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Index outside the 1-based range of the list
    #[error("Invalid index {index}: must be between 1 and {len}")]
    IndexOutOfRange {
        /// Index as typed by the user (1-based)
        index: i64,
        /// Current list length
        len: usize,
    },

    /// Index text did not contain a number
    #[error("Invalid index: '{input}' is not a number")]
    InvalidIndex {
        /// The rejected input
        input: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to the missing config file
        path: String,
    },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    ConfigValue {
        /// Configuration key
        key: String,
        /// Error message
        message: String,
    },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config value error
    pub fn config_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an invalid index error
    pub fn invalid_index(input: impl Into<String>) -> Self {
        Self::InvalidIndex {
            input: input.into(),
        }
    }

    /// True for user input rejected before any storage access
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. } | Self::InvalidIndex { .. })
    }
}
