//! Domain list store
//!
//! Owns the authoritative domain list for one session and keeps it in step
//! with a storage area. Every mutation writes the complete list first and
//! only replaces the in-memory copy once the write succeeded, so a failed
//! write leaves both copies at the previous state.

use crate::domain::{default_list, normalize, parse_index, Domain};
use crate::error::{Error, Result};
use crate::storage::KeyValueStore;
use tracing::{debug, info, warn};

/// Storage key holding the domain list
pub const DEFAULT_STORAGE_KEY: &str = "unreliableDomains";

/// Result of adding a domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Appended and persisted
    Added(Domain),
    /// Already in the list; nothing written
    AlreadyPresent(Domain),
    /// Input was empty after normalization; nothing written
    Blank,
}

/// The unreliable-domain list bound to a storage key
#[derive(Debug)]
pub struct DomainListStore<S> {
    backend: S,
    key: String,
    domains: Vec<Domain>,
}

impl<S: KeyValueStore> DomainListStore<S> {
    /// Open a session: load the list stored under `key`
    pub async fn open(backend: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let domains = Self::load(&backend, &key).await;
        Self {
            backend,
            key,
            domains,
        }
    }

    /// Open a session on [`DEFAULT_STORAGE_KEY`]
    pub async fn with_default_key(backend: S) -> Self {
        Self::open(backend, DEFAULT_STORAGE_KEY).await
    }

    /// Read the list stored under `key`
    ///
    /// Never fails: read errors, malformed values and an absent or empty
    /// list all yield the default list.
    pub async fn load(backend: &S, key: &str) -> Vec<Domain> {
        let value = match backend.get(key).await {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("No list stored under '{}', using defaults", key);
                return default_list();
            }
            Err(e) => {
                match std::error::Error::source(&e) {
                    Some(cause) => warn!("Error loading domains: {}: {}", e, cause),
                    None => warn!("Error loading domains: {}", e),
                }
                return default_list();
            }
        };

        match serde_json::from_value::<Vec<Domain>>(value) {
            Ok(list) if !list.is_empty() => {
                debug!("Loaded {} domains from '{}'", list.len(), key);
                list
            }
            Ok(_) => {
                debug!("Stored list under '{}' is empty, using defaults", key);
                default_list()
            }
            Err(e) => {
                warn!("Stored value under '{}' is not a domain list: {}", key, e);
                default_list()
            }
        }
    }

    /// Write `list` under this store's key
    ///
    /// Does not touch the in-memory list.
    pub async fn save(&self, list: &[Domain]) -> Result<()> {
        let value = serde_json::to_value(list)?;
        self.backend.set(&self.key, value).await?;
        Ok(())
    }

    async fn commit(&mut self, list: Vec<Domain>) -> Result<()> {
        self.save(&list).await?;
        self.domains = list;
        Ok(())
    }

    /// Normalize `input` and append it unless blank or already listed
    pub async fn add(&mut self, input: &str) -> Result<AddOutcome> {
        let Some(domain) = normalize(input) else {
            return Ok(AddOutcome::Blank);
        };

        if self.contains(&domain) {
            debug!("{} is already in the list", domain);
            return Ok(AddOutcome::AlreadyPresent(domain));
        }

        let mut updated = self.domains.clone();
        updated.push(domain.clone());
        self.commit(updated).await?;

        info!("Added {} ({} domains)", domain, self.domains.len());
        Ok(AddOutcome::Added(domain))
    }

    /// Remove the entry at a 1-based position
    pub async fn remove_at(&mut self, index: usize) -> Result<Domain> {
        if index == 0 || index > self.domains.len() {
            return Err(Error::IndexOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                len: self.domains.len(),
            });
        }

        let mut updated = self.domains.clone();
        let removed = updated.remove(index - 1);
        self.commit(updated).await?;

        info!("Removed {} ({} domains)", removed, self.domains.len());
        Ok(removed)
    }

    /// Parse a typed position and remove that entry
    pub async fn remove_at_str(&mut self, input: &str) -> Result<Domain> {
        let index = parse_index(input)?;
        match usize::try_from(index) {
            Ok(position) => self.remove_at(position).await,
            Err(_) => Err(Error::IndexOutOfRange {
                index,
                len: self.domains.len(),
            }),
        }
    }

    /// Replace the list with the defaults
    pub async fn reset(&mut self) -> Result<()> {
        self.commit(default_list()).await?;
        info!("Domain list reset to {} defaults", self.domains.len());
        Ok(())
    }

    /// True if a domain naming the same host is listed
    pub fn contains(&self, domain: &Domain) -> bool {
        self.domains.iter().any(|d| d.same_host(domain))
    }

    /// Current list, in insertion order
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Entries paired with their 1-based display position
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Domain)> {
        self.domains.iter().enumerate().map(|(i, d)| (i + 1, d))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// True if the list has no entries
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Storage key in use
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying storage area
    pub fn backend(&self) -> &S {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_DOMAINS;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn names(store: &DomainListStore<MemoryStore>) -> Vec<&str> {
        store.domains().iter().map(Domain::as_str).collect()
    }

    async fn store_with(list: &[&str]) -> (DomainListStore<MemoryStore>, MemoryStore) {
        let backend = MemoryStore::with_entry(DEFAULT_STORAGE_KEY, json!(list));
        let observer = backend.clone();
        (DomainListStore::with_default_key(backend).await, observer)
    }

    #[tokio::test]
    async fn test_load_absent_gives_defaults() {
        let store = DomainListStore::with_default_key(MemoryStore::new()).await;
        assert_eq!(names(&store), DEFAULT_DOMAINS.to_vec());
    }

    #[tokio::test]
    async fn test_load_empty_gives_defaults() {
        let (store, _) = store_with(&[]).await;
        assert_eq!(store.len(), DEFAULT_DOMAINS.len());
    }

    #[tokio::test]
    async fn test_load_read_error_gives_defaults() {
        let backend = MemoryStore::with_entry(DEFAULT_STORAGE_KEY, json!(["a.com"]));
        backend.fail_reads(true);
        let store = DomainListStore::with_default_key(backend).await;
        assert_eq!(names(&store), DEFAULT_DOMAINS.to_vec());
    }

    #[tokio::test]
    async fn test_load_malformed_gives_defaults() {
        let backend = MemoryStore::with_entry(DEFAULT_STORAGE_KEY, json!({"a": 1}));
        let store = DomainListStore::with_default_key(backend).await;
        assert_eq!(store.len(), 20);
    }

    #[tokio::test]
    async fn test_load_stored_list_unchanged() {
        let (store, _) = store_with(&["b.com", "WWW.A.com"]).await;
        assert_eq!(names(&store), vec!["b.com", "WWW.A.com"]);
    }

    #[tokio::test]
    async fn test_add_normalizes_and_persists() {
        let (mut store, observer) = store_with(&["cnn.com"]).await;

        let outcome = store.add("WWW.Example.com").await.unwrap();
        assert_eq!(outcome, AddOutcome::Added(Domain::from_stored("example.com")));
        assert_eq!(names(&store), vec!["cnn.com", "example.com"]);
        assert_eq!(
            observer.snapshot(DEFAULT_STORAGE_KEY),
            Some(json!(["cnn.com", "example.com"]))
        );
    }

    #[tokio::test]
    async fn test_add_duplicate_any_case() {
        let (mut store, observer) = store_with(&["cnn.com", "WWW.BBC.com"]).await;

        for input in ["CNN.com", "www.cnn.com", " cnn.com ", "bbc.com"] {
            let outcome = store.add(input).await.unwrap();
            assert!(matches!(outcome, AddOutcome::AlreadyPresent(_)), "input {input:?}");
        }
        assert_eq!(store.len(), 2);
        assert_eq!(
            observer.snapshot(DEFAULT_STORAGE_KEY),
            Some(json!(["cnn.com", "WWW.BBC.com"]))
        );
    }

    #[tokio::test]
    async fn test_add_blank_is_noop() {
        let (mut store, _) = store_with(&["cnn.com"]).await;
        assert_eq!(store.add("   ").await.unwrap(), AddOutcome::Blank);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_out_of_range() {
        let (mut store, observer) = store_with(&["a.com", "b.com", "c.com"]).await;

        for index in [0, 4] {
            let err = store.remove_at(index).await.unwrap_err();
            assert!(matches!(err, Error::IndexOutOfRange { len: 3, .. }));
        }
        assert_eq!(store.len(), 3);
        assert_eq!(
            observer.snapshot(DEFAULT_STORAGE_KEY),
            Some(json!(["a.com", "b.com", "c.com"]))
        );
    }

    #[tokio::test]
    async fn test_remove_shifts_left() {
        let (mut store, observer) = store_with(&["a.com", "b.com", "c.com"]).await;

        let removed = store.remove_at(2).await.unwrap();
        assert_eq!(removed.as_str(), "b.com");
        assert_eq!(names(&store), vec!["a.com", "c.com"]);
        assert_eq!(
            observer.snapshot(DEFAULT_STORAGE_KEY),
            Some(json!(["a.com", "c.com"]))
        );
    }

    #[tokio::test]
    async fn test_remove_at_str() {
        let (mut store, _) = store_with(&["a.com", "b.com"]).await;

        assert!(matches!(
            store.remove_at_str("abc").await.unwrap_err(),
            Error::InvalidIndex { .. }
        ));
        assert!(matches!(
            store.remove_at_str("-1").await.unwrap_err(),
            Error::IndexOutOfRange { index: -1, len: 2 }
        ));
        assert_eq!(store.remove_at_str("1st").await.unwrap().as_str(), "a.com");
        assert_eq!(names(&store), vec!["b.com"]);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let (mut store, observer) = store_with(&["a.com"]).await;
        store.reset().await.unwrap();
        assert_eq!(names(&store), DEFAULT_DOMAINS.to_vec());
        assert_eq!(
            observer.snapshot(DEFAULT_STORAGE_KEY),
            Some(json!(DEFAULT_DOMAINS))
        );
    }

    #[tokio::test]
    async fn test_failed_write_keeps_both_copies() {
        let (mut store, observer) = store_with(&["a.com", "b.com"]).await;
        observer.fail_writes(true);

        assert!(matches!(
            store.add("c.com").await.unwrap_err(),
            Error::Storage(_)
        ));
        assert!(store.remove_at(1).await.is_err());
        assert!(store.reset().await.is_err());

        assert_eq!(names(&store), vec!["a.com", "b.com"]);
        assert_eq!(
            observer.snapshot(DEFAULT_STORAGE_KEY),
            Some(json!(["a.com", "b.com"]))
        );
    }

    #[tokio::test]
    async fn test_numbered_is_one_based() {
        let (store, _) = store_with(&["a.com", "b.com"]).await;
        let numbered: Vec<_> = store.numbered().map(|(n, d)| (n, d.as_str())).collect();
        assert_eq!(numbered, vec![(1, "a.com"), (2, "b.com")]);
    }

    #[tokio::test]
    async fn test_custom_key() {
        let backend = MemoryStore::new();
        let observer = backend.clone();
        let mut store = DomainListStore::open(backend, "customKey").await;
        store.add("x.org").await.unwrap();
        assert_eq!(store.key(), "customKey");
        assert!(observer.snapshot(DEFAULT_STORAGE_KEY).is_none());
        assert_eq!(observer.snapshot("customKey").unwrap().as_array().unwrap().len(), 21);
    }
}
