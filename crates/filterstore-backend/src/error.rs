//! Error types for the storage backends.
//!
//! Absence of a record is never an error: reads return `Ok(None)` and
//! deletes return `Ok(false)`. The variants here are genuine faults, with
//! [`BackendError::Unavailable`] marking the transient, retry-worthy kind.

use thiserror::Error;

/// Errors that can occur during backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transient fault: the backend could not be reached or answered with
    /// a server-side failure. Safe to retry; `create_if_absent` is
    /// idempotent for identical payloads.
    #[error("backend unavailable: {reason}")]
    Unavailable { reason: String },

    /// Unexpected, non-transient HTTP status from the remote blob store.
    #[error("unexpected HTTP status {status} from blob store")]
    Http { status: u16 },

    /// I/O error from the local filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored record or its metadata is malformed.
    #[error("invalid stored data for {id}: {reason}")]
    InvalidData { id: String, reason: String },
}

// reqwest errors are connect/timeout/body-level faults; all transient.
impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        BackendError::Unavailable {
            reason: e.to_string(),
        }
    }
}

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;
