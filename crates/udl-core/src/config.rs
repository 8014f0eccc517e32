//! Configuration management
//!
//! Provides a strongly-typed configuration system with TOML support for
//! the storage area and logging.

use crate::error::{Error, Result};
use crate::storage::{FileStore, KeyValueStore, MemoryStore, DEFAULT_QUOTA_BYTES_PER_ITEM};
use crate::store::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application name used for platform directories
pub const APP_NAME: &str = "unreliable-domains";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage area settings
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| Error::ConfigNotFound {
            path: path.display().to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(Error::from)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.key.trim().is_empty() {
            return Err(Error::config_value("storage.key", "Must not be empty"));
        }

        if self.storage.backend == StorageBackend::File {
            if let Some(path) = &self.storage.path {
                if path.as_os_str().is_empty() {
                    return Err(Error::config_value("storage.path", "Must not be empty"));
                }
            }
        }

        const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
        if !LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_value(
                "logging.level",
                format!("Unknown level '{}'. Expected one of: {}", self.logging.level, LEVELS.join(", ")),
            ));
        }

        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

/// Which storage area holds the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON file on disk
    #[default]
    File,
    /// Process memory; nothing survives exit
    Memory,
}

/// Storage area configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend kind
    pub backend: StorageBackend,
    /// Area file (None = platform data directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Key holding the domain list
    pub key: String,
    /// Maximum serialized size per item in bytes (0 = unlimited)
    pub quota_bytes_per_item: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
            quota_bytes_per_item: DEFAULT_QUOTA_BYTES_PER_ITEM,
        }
    }
}

impl StorageConfig {
    /// Area file to use, falling back to the platform data directory
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_storage_path)
    }

    /// Build the configured storage area
    pub fn build_backend(&self) -> Box<dyn KeyValueStore> {
        match self.backend {
            StorageBackend::File => Box::new(
                FileStore::new(self.resolved_path()).with_quota(self.quota_bytes_per_item),
            ),
            StorageBackend::Memory => Box::new(MemoryStore::new()),
        }
    }
}

/// Default area file: `<data dir>/storage.json`
pub fn default_storage_path() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().join("storage.json"))
        .unwrap_or_else(|| PathBuf::from("storage.json"))
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log file path (None = stderr only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Enable JSON format logging
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            json_format: false,
        }
    }
}
