//! Error types for the filter store core.

use thiserror::Error;

/// Core errors that can occur during canonicalization and identifier parsing.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The document cannot be represented as a JSON tree
    /// (non-string map keys and the like).
    #[error("unserializable document: {0}")]
    Unserializable(String),

    /// The identifier does not match the required shape
    /// (16-64 lowercase hex characters).
    #[error("invalid identifier {id:?}: {reason}")]
    InvalidId { id: String, reason: &'static str },
}

/// Result type for core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
