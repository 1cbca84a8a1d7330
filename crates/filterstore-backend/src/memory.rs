//! In-memory implementation of the Backend trait.
//!
//! This is primarily for testing and embedding. It has the same semantics
//! as the durable backends but keeps everything in memory.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use filterstore_core::{Digest, FilterId};

use crate::error::Result;
use crate::record_key;
use crate::traits::{Backend, CreateOutcome};

/// In-memory backend.
///
/// All data is lost when the backend is dropped. Thread-safe via RwLock;
/// holding the write guard across the check-and-insert makes
/// `create_if_absent` atomic.
pub struct MemoryBackend {
    records: RwLock<HashMap<String, StoredRecord>>,
}

struct StoredRecord {
    body: Vec<u8>,
    digest: Digest,
}

impl MemoryBackend {
    /// Create a new empty in-memory backend.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored records. Test hook for dedup assertions.
    pub fn record_count(&self) -> usize {
        self.records.read().unwrap().len()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn exists(&self, id: &FilterId) -> Result<bool> {
        let records = self.records.read().unwrap();
        Ok(records.contains_key(&record_key(id)))
    }

    async fn read(&self, id: &FilterId) -> Result<Option<Vec<u8>>> {
        let records = self.records.read().unwrap();
        Ok(records.get(&record_key(id)).map(|r| r.body.clone()))
    }

    async fn read_digest(&self, id: &FilterId) -> Result<Option<Digest>> {
        let records = self.records.read().unwrap();
        Ok(records.get(&record_key(id)).map(|r| r.digest))
    }

    async fn create_if_absent(
        &self,
        id: &FilterId,
        body: &[u8],
        digest: &Digest,
    ) -> Result<CreateOutcome> {
        let mut records = self.records.write().unwrap();
        let key = record_key(id);

        if records.contains_key(&key) {
            return Ok(CreateOutcome::AlreadyExists);
        }

        records.insert(
            key,
            StoredRecord {
                body: body.to_vec(),
                digest: *digest,
            },
        );
        Ok(CreateOutcome::Created)
    }

    async fn delete(&self, id: &FilterId) -> Result<bool> {
        let mut records = self.records.write().unwrap();
        Ok(records.remove(&record_key(id)).is_some())
    }
}
