//! # Unreliable Domains Core
//!
//! Platform-independent library behind the unreliable-domains list editor.
//!
//! ## Architecture
//!
//! This crate provides:
//! - **Domain normalization** - Canonical form of user-typed hostnames
//! - **Key-value storage** - Async storage areas (file and in-memory)
//! - **Domain list store** - Load/add/remove/reset over a storage key
//! - **Configuration** - TOML-based settings for storage and logging
//!
//! ## Example
//!
//! ```rust,no_run
//! use udl_core::storage::FileStore;
//! use udl_core::store::{AddOutcome, DomainListStore};
//!
//! # async fn demo() -> udl_core::Result<()> {
//! let backend = FileStore::new("storage.json");
//! let mut store = DomainListStore::with_default_key(backend).await;
//!
//! if let AddOutcome::Added(domain) = store.add("WWW.Example.com").await? {
//!     println!("added {domain}");
//! }
//! store.remove_at(1).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod domain;
pub mod error;
pub mod storage;
pub mod store;

// Re-exports for convenience
pub use config::Config;
pub use domain::{normalize, parse_index, Domain, DEFAULT_DOMAINS};
pub use error::{Error, Result};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{AddOutcome, DomainListStore, DEFAULT_STORAGE_KEY};
