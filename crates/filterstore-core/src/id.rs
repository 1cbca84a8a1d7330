//! Validated identifiers for stored filter configurations.
//!
//! An identifier is a 16-64 character lowercase hex prefix of a content
//! digest. Shape validation happens at parse time, before any storage
//! backend is consulted; an invalid shape is a caller error, not a
//! storage error.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::digest::Digest;
use crate::error::CoreError;

/// Shortest identifier the allocator will hand out.
pub const MIN_ID_LEN: usize = 16;

/// Longest possible identifier: the full 64-character digest hex.
pub const MAX_ID_LEN: usize = 64;

/// A validated record identifier: 16-64 lowercase hex characters.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FilterId(String);

impl FilterId {
    /// Parse and validate an identifier.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if s.len() < MIN_ID_LEN || s.len() > MAX_ID_LEN {
            return Err(CoreError::InvalidId {
                id: s.to_string(),
                reason: "length must be 16-64 characters",
            });
        }
        if !s
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return Err(CoreError::InvalidId {
                id: s.to_string(),
                reason: "only lowercase hex characters are allowed",
            });
        }
        Ok(Self(s.to_string()))
    }

    /// The identifier formed by the first `len` hex characters of a digest.
    pub fn from_digest(digest: &Digest, len: usize) -> Self {
        debug_assert!((MIN_ID_LEN..=MAX_ID_LEN).contains(&len));
        Self(digest.to_hex()[..len].to_string())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of hex characters in the identifier.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FilterId({})", self.0)
    }
}

impl FromStr for FilterId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for FilterId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Deserialization goes through `parse` so invalid identifiers cannot
// enter the system via serde either.
impl<'de> Deserialize<'de> for FilterId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        FilterId::parse(&s).map_err(serde::de::Error::custom)
    }
}
