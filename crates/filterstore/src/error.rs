//! Error types for the store facade.
//!
//! Every internal failure is converted to one of these kinds before it
//! crosses the facade boundary; no backend-specific type leaks through.

use thiserror::Error;

use filterstore_backend::BackendError;
use filterstore_core::CoreError;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Caller error: unserializable document or malformed identifier.
    /// Never worth retrying.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage backend fault, propagated intact. The
    /// [`BackendError::Unavailable`] kind is transient and safe to retry;
    /// no partial record is left behind.
    #[error("storage backend error: {0}")]
    Backend(#[from] BackendError),

    /// All 49 candidate prefixes of the digest were taken by records with
    /// different digests. Statistically negligible with a real digest;
    /// signals an anomaly or a backend inconsistency. Fatal, never
    /// silently retried.
    #[error("hash space exhausted for digest {digest}: tried prefixes {tried:?}")]
    HashSpaceExhausted {
        digest: String,
        tried: Vec<String>,
    },

    /// A stored body no longer parses as JSON.
    #[error("corrupt record {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
