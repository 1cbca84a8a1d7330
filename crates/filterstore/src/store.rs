//! The FilterStore: unified save/load/delete API over a storage backend.
//!
//! The facade owns the full flow per request: canonicalize the document,
//! digest the canonical bytes, allocate a collision-checked identifier,
//! and persist through the backend. It keeps no cross-request mutable
//! state beyond a bounded, non-authoritative read cache.

use std::num::NonZeroUsize;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, trace};

use filterstore_backend::Backend;
use filterstore_core::{canonical_json_bytes, to_canonical_value};
use filterstore_core::{Digester, FilterId, Sha256Digester};

use crate::allocator::{allocate, Allocation};
use crate::cache::ReadCache;
use crate::error::{Result, StoreError};

/// Configuration for the store facade.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Capacity of the read memoization cache.
    pub cache_capacity: NonZeroUsize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            // NonZeroUsize::new(256) is trivially Some.
            cache_capacity: NonZeroUsize::new(256).unwrap(),
        }
    }
}

/// Content-addressed store for filter configuration documents.
///
/// Generic over the storage backend (injected, never global) and the
/// digest function (SHA-256 in production; tests may substitute stubs to
/// force truncation collisions).
///
/// Correctness under concurrency rests entirely on the backend's atomic
/// `create_if_absent`; the facade takes no locks of its own.
pub struct FilterStore<B: Backend, D: Digester = Sha256Digester> {
    backend: B,
    digester: D,
    cache: ReadCache,
}

impl<B: Backend> FilterStore<B> {
    /// Create a store over a backend with the production digest function.
    pub fn new(backend: B, config: StoreConfig) -> Self {
        Self::with_digester(backend, Sha256Digester, config)
    }
}

impl<B: Backend, D: Digester> FilterStore<B, D> {
    /// Create a store with a custom digest function.
    pub fn with_digester(backend: B, digester: D, config: StoreConfig) -> Self {
        Self {
            backend,
            digester,
            cache: ReadCache::new(config.cache_capacity),
        }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Save a filter configuration, deduplicating by content.
    ///
    /// Identical documents (deep equality, key order irrelevant) always
    /// resolve to the same identifier and never produce a second record.
    /// Safe to retry on a transient backend fault: the conditional create
    /// is idempotent for identical payloads.
    pub async fn save<T: Serialize + ?Sized>(&self, document: &T) -> Result<Allocation> {
        let value = to_canonical_value(document)?;
        let bytes = canonical_json_bytes(&value);
        let digest = self.digester.digest(&bytes);

        let allocation = allocate(&self.backend, &digest, &bytes).await?;
        if allocation.created {
            info!(id = %allocation.id, "saved new filter configuration");
        } else {
            debug!(id = %allocation.id, "filter configuration already stored");
        }
        Ok(allocation)
    }

    /// Load a stored filter configuration.
    ///
    /// Identifier shape is enforced by [`FilterId`] at parse time, so the
    /// backend is only ever consulted with well-formed keys. Returns
    /// `Ok(None)` if no record exists.
    pub async fn load(&self, id: &FilterId) -> Result<Option<Value>> {
        if let Some(document) = self.cache.get(id) {
            trace!(id = %id, "read cache hit");
            return Ok(Some(document));
        }

        // Snapshot the invalidation epoch before the read so a delete
        // that lands mid-load suppresses the fill below.
        let epoch = self.cache.epoch();
        let Some(bytes) = self.backend.read(id).await? else {
            return Ok(None);
        };

        let document: Value =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
                id: id.to_string(),
                reason: e.to_string(),
            })?;

        self.cache.put_if_current(id.clone(), document.clone(), epoch);
        Ok(Some(document))
    }

    /// Delete a stored filter configuration.
    ///
    /// Returns `true` if a record existed. The read cache entry is
    /// dropped whatever the backend answers, so a stale fill cannot
    /// outlive the record.
    pub async fn delete(&self, id: &FilterId) -> Result<bool> {
        let deleted = self.backend.delete(id).await?;
        self.cache.invalidate(id);
        if deleted {
            info!(id = %id, "deleted filter configuration");
        } else {
            debug!(id = %id, "delete of unknown identifier");
        }
        Ok(deleted)
    }
}
