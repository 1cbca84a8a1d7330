//! # Filterstore Backend
//!
//! Storage abstraction for the filter store. Provides a trait-based
//! interface for record persistence with filesystem, remote blob store,
//! and in-memory implementations.
//!
//! ## Overview
//!
//! Records are immutable blobs keyed by their [`FilterId`]: the canonical
//! JSON body plus the full content digest as out-of-band metadata. The
//! [`Backend`] trait exposes the capability set the allocator relies on:
//! `exists`, `read`, `read_digest`, `create_if_absent`, `delete`.
//!
//! `create_if_absent` is atomic with respect to concurrent callers on the
//! same key. It is the single synchronization primitive of the system;
//! dedup correctness rests on it.
//!
//! ## Key Types
//!
//! - [`Backend`] - The async trait for all storage operations
//! - [`FsBackend`] - Local filesystem storage with exclusive-create semantics
//! - [`RemoteBackend`] - HTTP blob store using a conditional-write precondition
//! - [`MemoryBackend`] - In-memory storage for tests and embedding
//! - [`CreateOutcome`] - Result of a conditional create

pub mod error;
pub mod fs;
pub mod memory;
pub mod remote;
pub mod traits;

pub use error::{BackendError, Result};
pub use fs::FsBackend;
pub use memory::MemoryBackend;
pub use remote::{RemoteBackend, RemoteConfig};
pub use traits::{Backend, CreateOutcome};

use filterstore_core::FilterId;

/// Suffix for record keys; one record per identifier at `{id}.json`.
pub(crate) const RECORD_SUFFIX: &str = ".json";

/// The backend-agnostic key for a record.
pub(crate) fn record_key(id: &FilterId) -> String {
    format!("{}{}", id.as_str(), RECORD_SUFFIX)
}
