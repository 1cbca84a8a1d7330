//! Bounded LRU memoization of recently loaded documents.
//!
//! Sits in front of the backend's `read` only. Never consulted for the
//! existence or metadata checks the allocator performs, so it cannot
//! affect dedup decisions; it is invalidated explicitly on delete.
//!
//! Fills are epoch-checked: a load snapshots the invalidation epoch
//! before its backend read and the fill is dropped if any delete bumped
//! the epoch in between. Otherwise a load racing a delete could park
//! between its backend read and its cache fill, and the late fill would
//! resurrect the deleted record until LRU eviction.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;
use serde_json::Value;

use filterstore_core::FilterId;

pub(crate) struct ReadCache {
    inner: Mutex<Inner>,
}

struct Inner {
    entries: LruCache<FilterId, Value>,
    epoch: u64,
}

impl ReadCache {
    pub(crate) fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                epoch: 0,
            }),
        }
    }

    pub(crate) fn get(&self, id: &FilterId) -> Option<Value> {
        self.inner.lock().unwrap().entries.get(id).cloned()
    }

    /// The current invalidation epoch; snapshot before a backend read.
    pub(crate) fn epoch(&self) -> u64 {
        self.inner.lock().unwrap().epoch
    }

    /// Fill the cache unless an invalidation happened since `epoch` was
    /// snapshotted.
    pub(crate) fn put_if_current(&self, id: FilterId, document: Value, epoch: u64) {
        let mut inner = self.inner.lock().unwrap();
        if inner.epoch == epoch {
            inner.entries.put(id, document);
        }
    }

    pub(crate) fn invalidate(&self, id: &FilterId) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.pop(id);
        inner.epoch += 1;
    }
}
