//! Stub digest functions for exercising collision paths.

use std::collections::HashMap;

use serde::Serialize;

use filterstore_core::{
    canonical_json_bytes, to_canonical_value, Digest, Digester, Sha256Digester,
};

/// A digester with per-document overrides, falling back to SHA-256.
///
/// Overrides are keyed by canonical bytes, so deep-equal documents hit
/// the same override regardless of key order - exactly like the real
/// pipeline.
#[derive(Default)]
pub struct StubDigester {
    overrides: HashMap<Vec<u8>, Digest>,
}

impl StubDigester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the digest of a document to a 64-character hex value.
    ///
    /// # Panics
    ///
    /// Panics on unserializable documents or malformed hex; this is test
    /// plumbing, misuse should fail loudly.
    pub fn with_mapping<T: Serialize + ?Sized>(mut self, document: &T, digest_hex: &str) -> Self {
        let value = to_canonical_value(document).expect("fixture document must serialize");
        let bytes = canonical_json_bytes(&value);
        let digest = Digest::from_hex(digest_hex).expect("fixture digest must be 64 hex chars");
        self.overrides.insert(bytes, digest);
        self
    }
}

impl Digester for StubDigester {
    fn digest(&self, data: &[u8]) -> Digest {
        match self.overrides.get(data) {
            Some(digest) => *digest,
            None => Sha256Digester.digest(data),
        }
    }
}

/// A digester that answers the same digest for every input.
///
/// Useful for driving the allocator into its hash-space-exhaustion path
/// against a pre-seeded backend.
#[derive(Debug, Clone, Copy)]
pub struct FixedDigester(pub Digest);

impl Digester for FixedDigester {
    fn digest(&self, _data: &[u8]) -> Digest {
        self.0
    }
}
