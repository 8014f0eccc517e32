use super::{KeyValueStore, StorageError};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-process storage area
///
/// Clones share the same entries, so a test can hand one clone to a
/// [`DomainListStore`](crate::store::DomainListStore) and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Value>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Create an empty area
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an area with one entry already stored
    pub fn with_entry(key: impl Into<String>, value: Value) -> Self {
        let store = Self::new();
        store.entries.write().insert(key.into(), value);
        store
    }

    /// Make every subsequent `get` fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `set` fail without storing anything
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current value under `key`, bypassing fault injection
    pub fn snapshot(&self, key: &str) -> Option<Value> {
        self.entries.read().get(key).cloned()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!("read of '{key}' refused")));
        }
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!("write of '{key}' refused")));
        }
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }
}
