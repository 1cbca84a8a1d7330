//! Backend trait: the abstract interface for record persistence.
//!
//! This trait allows the store facade and identifier allocator to be
//! storage-agnostic. Implementations include the local filesystem, a
//! remote HTTP blob store, and in-memory (for tests).

use async_trait::async_trait;
use filterstore_core::{Digest, FilterId};

use crate::error::Result;

/// Result of a conditional create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The record was created; this caller won the key.
    Created,
    /// The key was already taken, by an earlier save or by a concurrent
    /// writer that won the race. Not an error.
    AlreadyExists,
}

/// The Backend trait: async interface for record persistence.
///
/// All implementations must satisfy these invariants:
/// - Records are immutable once created; `delete` is the only mutation.
/// - `create_if_absent` is atomic with respect to concurrent callers on
///   the same key. No in-process locks exist above this layer; it is the
///   linchpin of dedup correctness.
/// - Absence is `Ok(None)` / `Ok(false)`, never an error. Transient I/O
///   and network faults surface as [`BackendError::Unavailable`] so
///   callers can tell a retry-worthy fault from an authoritative negative.
/// - No backend-specific error type leaks past this interface.
///
/// [`BackendError::Unavailable`]: crate::error::BackendError::Unavailable
#[async_trait]
pub trait Backend: Send + Sync {
    /// Check whether a record exists for the identifier.
    async fn exists(&self, id: &FilterId) -> Result<bool>;

    /// Read the canonical body of a record.
    ///
    /// Returns `Ok(None)` if no record exists.
    async fn read(&self, id: &FilterId) -> Result<Option<Vec<u8>>>;

    /// Read the full content digest stored alongside a record, without
    /// fetching the body. Used for cheap truncation-collision checks.
    ///
    /// Returns `Ok(None)` if no record exists.
    async fn read_digest(&self, id: &FilterId) -> Result<Option<Digest>>;

    /// Create a record if and only if the key is not already taken.
    ///
    /// The body is the canonical JSON of the document; the digest is
    /// attached as metadata, read-only after creation.
    async fn create_if_absent(
        &self,
        id: &FilterId,
        body: &[u8],
        digest: &Digest,
    ) -> Result<CreateOutcome>;

    /// Delete a record. Returns `true` if the record existed.
    async fn delete(&self, id: &FilterId) -> Result<bool>;
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for std::sync::Arc<B> {
    async fn exists(&self, id: &FilterId) -> Result<bool> {
        (**self).exists(id).await
    }

    async fn read(&self, id: &FilterId) -> Result<Option<Vec<u8>>> {
        (**self).read(id).await
    }

    async fn read_digest(&self, id: &FilterId) -> Result<Option<Digest>> {
        (**self).read_digest(id).await
    }

    async fn create_if_absent(
        &self,
        id: &FilterId,
        body: &[u8],
        digest: &Digest,
    ) -> Result<CreateOutcome> {
        (**self).create_if_absent(id, body, digest).await
    }

    async fn delete(&self, id: &FilterId) -> Result<bool> {
        (**self).delete(id).await
    }
}
