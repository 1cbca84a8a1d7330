//! # Filterstore
//!
//! A content-addressed store for JSON filter configurations. Identical
//! documents always resolve to the same identifier (deduplication);
//! clients fetch or delete a configuration by that identifier later.
//!
//! ## How identifiers work
//!
//! A document is canonicalized (sorted keys, compact JSON), digested with
//! SHA-256, and keyed by the shortest digest prefix of at least 16 hex
//! characters that is either free or already holds this exact content.
//! The prefix widens only on a verified truncation collision - two
//! different digests sharing a short prefix - never on duplicate saves.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use filterstore::{FilterStore, StoreConfig};
//! use filterstore::backend::FsBackend;
//! use serde_json::json;
//!
//! async fn example() {
//!     let backend = FsBackend::create("./filters").await.unwrap();
//!     let store = FilterStore::new(backend, StoreConfig::default());
//!
//!     let doc = json!({"groups": [{"rules": [], "is_must": true}]});
//!     let saved = store.save(&doc).await.unwrap();
//!
//!     let loaded = store.load(&saved.id).await.unwrap();
//!     assert_eq!(loaded, Some(doc));
//!
//!     store.delete(&saved.id).await.unwrap();
//! }
//! ```
//!
//! ## Concurrency
//!
//! Every save/load/delete call is an independent unit of work; the only
//! synchronization primitive is the backend's atomic `create_if_absent`.
//! Concurrent saves of equal content converge on one identifier and one
//! record; concurrent saves of distinct content never interfere.

pub mod allocator;
mod cache;
pub mod error;
pub mod store;

// Re-export component crates
pub use filterstore_backend as backend;
pub use filterstore_core as core;

// Re-export main types for convenience
pub use allocator::Allocation;
pub use error::{Result, StoreError};
pub use store::{FilterStore, StoreConfig};

// Re-export commonly used component types
pub use filterstore_backend::{Backend, BackendError, CreateOutcome};
pub use filterstore_core::{
    canonical_json_bytes, to_canonical_value, CoreError, Digest, Digester, FilterId,
    Sha256Digester, MAX_ID_LEN, MIN_ID_LEN,
};
