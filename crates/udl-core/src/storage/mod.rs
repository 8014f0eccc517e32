//! Persistent key-value storage areas
//!
//! The domain list lives under a single key in a storage area, the way a
//! browser extension keeps settings in its sync storage. Two areas exist:
//! - [`FileStore`] - one JSON object file, replaced atomically on write
//! - [`MemoryStore`] - process-local map with fault injection for tests

mod file;
mod memory;

pub use file::{FileStore, DEFAULT_QUOTA_BYTES_PER_ITEM};
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a storage area
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {}", path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The backing file does not hold a JSON object
    #[error("Storage area {} is corrupt: {message}", path.display())]
    Corrupt {
        /// File being read
        path: PathBuf,
        /// What was wrong with it
        message: String,
    },

    /// Item larger than the per-item quota
    #[error("Item '{key}' is {size} bytes, over the {quota} byte quota")]
    QuotaExceeded {
        /// Key being written
        key: String,
        /// Serialized size of key plus value
        size: usize,
        /// Configured limit
        quota: usize,
    },

    /// The backend refused the request
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Value could not be encoded
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Async key-value storage area
///
/// `get` returns `None` for keys that were never written. `set` either
/// stores the whole value or leaves the previous one in place.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }
}

/// Serialized size of an item as counted against the per-item quota
pub(crate) fn item_size(key: &str, value: &Value) -> Result<usize, StorageError> {
    Ok(key.len() + serde_json::to_string(value)?.len())
}
