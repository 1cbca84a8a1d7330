//! # Filterstore Core
//!
//! Pure primitives for the filter store: canonical JSON encoding, digests,
//! and identifiers.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over JSON documents.
//!
//! ## Key Types
//!
//! - [`Digest`] - 32-byte content digest of a canonical document
//! - [`Digester`] - Trait over digest functions ([`Sha256Digester`] in production)
//! - [`FilterId`] - Validated hex-prefix identifier for a stored record
//!
//! ## Canonicalization
//!
//! Documents are encoded as canonical JSON: object keys sorted by UTF-8
//! bytes, no insignificant whitespace, scalar types preserved exactly.
//! See [`canonical`] module.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod id;

pub use canonical::{canonical_json_bytes, to_canonical_value};
pub use digest::{Digest, Digester, Sha256Digester};
pub use error::{CoreError, CoreResult};
pub use id::{FilterId, MAX_ID_LEN, MIN_ID_LEN};
