//! Content digests for canonical documents.
//!
//! Wraps SHA-256 with a strong type and a small trait seam so tests can
//! substitute digest functions (e.g. to force truncation collisions).

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::fmt;

use crate::id::FilterId;

/// A 32-byte content digest.
///
/// Deterministic function of the canonical bytes only. The hex form is
/// 64 lowercase characters; identifiers are prefixes of it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to a 64-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The identifier formed by the first `len` hex characters.
    pub fn id_prefix(&self, len: usize) -> FilterId {
        FilterId::from_digest(self, len)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A digest function over canonical bytes.
///
/// Pure: the output depends on the input bytes only. Production code uses
/// [`Sha256Digester`]; tests may substitute stubs to construct colliding
/// prefixes deterministically.
pub trait Digester: Send + Sync {
    /// Compute the digest of the given bytes.
    fn digest(&self, data: &[u8]) -> Digest;
}

/// SHA-256, the production digest function.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digester;

impl Digester for Sha256Digester {
    fn digest(&self, data: &[u8]) -> Digest {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Digest(hasher.finalize().into())
    }
}
