//! Fault injection: backends that fail or stall on demand.

use async_trait::async_trait;
use tokio::sync::Semaphore;

use filterstore_backend::{Backend, BackendError, CreateOutcome, Result};
use filterstore_core::{Digest, FilterId};

/// A backend whose every call reports a transient fault.
///
/// For asserting that `BackendUnavailable` propagates through the
/// allocator and facade without being mistaken for absence.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableBackend;

fn unavailable<T>() -> Result<T> {
    Err(BackendError::Unavailable {
        reason: "injected fault".into(),
    })
}

#[async_trait]
impl Backend for UnavailableBackend {
    async fn exists(&self, _id: &FilterId) -> Result<bool> {
        unavailable()
    }

    async fn read(&self, _id: &FilterId) -> Result<Option<Vec<u8>>> {
        unavailable()
    }

    async fn read_digest(&self, _id: &FilterId) -> Result<Option<Digest>> {
        unavailable()
    }

    async fn create_if_absent(
        &self,
        _id: &FilterId,
        _body: &[u8],
        _digest: &Digest,
    ) -> Result<CreateOutcome> {
        unavailable()
    }

    async fn delete(&self, _id: &FilterId) -> Result<bool> {
        unavailable()
    }
}

/// Wraps a backend and parks each `read` after the inner read resolves,
/// until the test releases it.
///
/// This opens the window between a backend read and whatever the caller
/// does with the result, so interleavings like "delete lands while a
/// load is in flight" become deterministic instead of timing-dependent.
pub struct GatedReadBackend<B> {
    inner: B,
    entered: Semaphore,
    release: Semaphore,
}

impl<B> GatedReadBackend<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            entered: Semaphore::new(0),
            release: Semaphore::new(0),
        }
    }

    /// Wait until a `read` has resolved against the inner backend and
    /// parked at the gate.
    pub async fn wait_for_read(&self) {
        self.entered
            .acquire()
            .await
            .expect("gate semaphore closed")
            .forget();
    }

    /// Let one parked (or future) `read` through the gate.
    pub fn release_read(&self) {
        self.release.add_permits(1);
    }
}

#[async_trait]
impl<B: Backend> Backend for GatedReadBackend<B> {
    async fn exists(&self, id: &FilterId) -> Result<bool> {
        self.inner.exists(id).await
    }

    async fn read(&self, id: &FilterId) -> Result<Option<Vec<u8>>> {
        let body = self.inner.read(id).await?;
        self.entered.add_permits(1);
        self.release
            .acquire()
            .await
            .expect("gate semaphore closed")
            .forget();
        Ok(body)
    }

    async fn read_digest(&self, id: &FilterId) -> Result<Option<Digest>> {
        self.inner.read_digest(id).await
    }

    async fn create_if_absent(
        &self,
        id: &FilterId,
        body: &[u8],
        digest: &Digest,
    ) -> Result<CreateOutcome> {
        self.inner.create_if_absent(id, body, digest).await
    }

    async fn delete(&self, id: &FilterId) -> Result<bool> {
        self.inner.delete(id).await
    }
}
