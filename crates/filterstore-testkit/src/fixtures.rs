//! Fixtures: sample documents and pre-wired stores.

use serde_json::{json, Value};

use filterstore::{FilterStore, StoreConfig};
use filterstore_backend::MemoryBackend;
use filterstore_core::Digester;

/// The course-selection filter from the API documentation examples.
pub fn sample_filter() -> Value {
    json!({
        "groups": [{
            "rules": [{"field": "code", "relation": "contains", "value": "CS"}],
            "is_must": true
        }]
    })
}

/// A second, distinct filter document.
pub fn sample_period_filter() -> Value {
    json!({
        "groups": [{
            "rules": [
                {"field": "period", "relation": "is in", "value": "2025-26 Period II"},
                {"field": "enrollment", "relation": "on", "value": null}
            ],
            "is_must": false
        }]
    })
}

/// An in-memory store with the production digest function.
pub fn memory_store() -> FilterStore<MemoryBackend> {
    FilterStore::new(MemoryBackend::new(), StoreConfig::default())
}

/// An in-memory store with a custom digester (see [`crate::stub`]).
pub fn memory_store_with<D: Digester>(digester: D) -> FilterStore<MemoryBackend, D> {
    FilterStore::with_digester(MemoryBackend::new(), digester, StoreConfig::default())
}
