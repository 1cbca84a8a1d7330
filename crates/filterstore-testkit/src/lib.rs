//! # Filterstore Testkit
//!
//! Testing utilities for the filter store.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: sample filter documents and pre-wired in-memory stores
//! - **Stub digesters**: deterministic digest functions for forcing
//!   truncation collisions and hash-space exhaustion
//! - **Generators**: proptest strategies for arbitrary JSON documents
//! - **Fault injection**: a backend whose every call reports a transient
//!   fault, and a gated backend that parks reads mid-flight, for
//!   exercising error propagation and race interleavings
//!
//! ## Forcing collisions
//!
//! The allocator widens identifiers only when two distinct digests share
//! a prefix - a situation SHA-256 will not produce on demand. The
//! [`StubDigester`] maps chosen documents to chosen digests so collision
//! paths become testable:
//!
//! ```rust
//! use filterstore_testkit::stub::StubDigester;
//! use serde_json::json;
//!
//! let digester = StubDigester::new()
//!     .with_mapping(&json!({"a": 1}), &"a".repeat(64))
//!     .with_mapping(&json!({"b": 2}), &format!("{}{}", "a".repeat(16), "b".repeat(48)));
//! ```

pub mod failing;
pub mod fixtures;
pub mod generators;
pub mod stub;

pub use failing::{GatedReadBackend, UnavailableBackend};
pub use fixtures::{memory_store, memory_store_with, sample_filter, sample_period_filter};
pub use generators::arb_document;
pub use stub::{FixedDigester, StubDigester};
