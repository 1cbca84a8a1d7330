//! End-to-end tests of the store facade over the in-memory and
//! filesystem backends.

use std::sync::Arc;

use futures_util::future::join_all;
use serde_json::json;

use filterstore::backend::{FsBackend, MemoryBackend};
use filterstore::{FilterId, FilterStore, StoreConfig};

fn memory_store() -> FilterStore<MemoryBackend> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    FilterStore::new(MemoryBackend::new(), StoreConfig::default())
}

fn sample_filter() -> serde_json::Value {
    json!({
        "groups": [{
            "rules": [{"field": "code", "relation": "contains", "value": "CS"}],
            "is_must": true
        }]
    })
}

#[tokio::test]
async fn test_save_load_round_trip() {
    let store = memory_store();
    let doc = sample_filter();

    let saved = store.save(&doc).await.unwrap();
    assert!(saved.created);
    assert_eq!(saved.id.len(), 16);

    let loaded = store.load(&saved.id).await.unwrap();
    assert_eq!(loaded, Some(doc));
}

#[tokio::test]
async fn test_duplicate_save_reuses_identifier() {
    let store = memory_store();
    let doc = sample_filter();

    let first = store.save(&doc).await.unwrap();
    let second = store.save(&doc).await.unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.id, second.id);
    assert_eq!(store.backend().record_count(), 1);
}

#[tokio::test]
async fn test_key_order_does_not_change_identifier() {
    let store = memory_store();

    let a: serde_json::Value =
        serde_json::from_str(r#"{"groups":[],"name":"x","limit":5}"#).unwrap();
    let b: serde_json::Value =
        serde_json::from_str(r#"{"limit":5,"name":"x","groups":[]}"#).unwrap();

    let first = store.save(&a).await.unwrap();
    let second = store.save(&b).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(store.backend().record_count(), 1);
}

#[tokio::test]
async fn test_distinct_documents_get_distinct_identifiers() {
    let store = memory_store();

    let first = store.save(&json!({"v": 1})).await.unwrap();
    let second = store.save(&json!({"v": "1"})).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(store.backend().record_count(), 2);
}

#[tokio::test]
async fn test_delete_then_load() {
    let store = memory_store();
    let doc = sample_filter();

    let saved = store.save(&doc).await.unwrap();
    // Warm the read cache before deleting.
    assert!(store.load(&saved.id).await.unwrap().is_some());

    assert!(store.delete(&saved.id).await.unwrap());
    assert_eq!(store.load(&saved.id).await.unwrap(), None);
    assert!(!store.delete(&saved.id).await.unwrap());
}

#[tokio::test]
async fn test_load_unknown_identifier() {
    let store = memory_store();
    let id = FilterId::parse("0123456789abcdef").unwrap();
    assert_eq!(store.load(&id).await.unwrap(), None);
}

#[tokio::test]
async fn test_identifier_shape_rejected_before_storage() {
    assert!(FilterId::parse("short").is_err());
    assert!(FilterId::parse("XYZ3456789ABCDEF").is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_identical_saves_converge() {
    let store = Arc::new(memory_store());
    let doc = Arc::new(sample_filter());

    let tasks: Vec<_> = (0..32)
        .map(|_| {
            let store = Arc::clone(&store);
            let doc = Arc::clone(&doc);
            tokio::spawn(async move { store.save(&*doc).await.unwrap() })
        })
        .collect();

    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    // Exactly one task created the record; all observed the same id.
    let created = results.iter().filter(|a| a.created).count();
    assert_eq!(created, 1);
    let first_id = &results[0].id;
    assert!(results.iter().all(|a| a.id == *first_id));
    assert_eq!(store.backend().record_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_distinct_saves_do_not_interfere() {
    let store = Arc::new(memory_store());

    let tasks: Vec<_> = (0..16)
        .map(|n| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.save(&json!({"n": n})).await.unwrap() })
        })
        .collect();

    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert!(results.iter().all(|a| a.created));
    assert_eq!(store.backend().record_count(), 16);
}

#[tokio::test]
async fn test_filesystem_backend_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FsBackend::create(dir.path()).await.unwrap();
    let store = FilterStore::new(backend, StoreConfig::default());
    let doc = sample_filter();

    let saved = store.save(&doc).await.unwrap();
    assert!(saved.created);

    // Record lands at {id}.json under the storage root.
    let body_path = dir.path().join(format!("{}.json", saved.id));
    assert!(body_path.exists());

    let again = store.save(&doc).await.unwrap();
    assert!(!again.created);
    assert_eq!(again.id, saved.id);

    assert_eq!(store.load(&saved.id).await.unwrap(), Some(doc));
    assert!(store.delete(&saved.id).await.unwrap());
    assert_eq!(store.load(&saved.id).await.unwrap(), None);
    assert!(!body_path.exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_filesystem_concurrent_identical_saves() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FsBackend::create(dir.path()).await.unwrap();
    let store = Arc::new(FilterStore::new(backend, StoreConfig::default()));
    let doc = Arc::new(sample_filter());

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let store = Arc::clone(&store);
            let doc = Arc::clone(&doc);
            tokio::spawn(async move { store.save(&*doc).await.unwrap() })
        })
        .collect();

    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(results.iter().filter(|a| a.created).count(), 1);
    let first_id = &results[0].id;
    assert!(results.iter().all(|a| a.id == *first_id));

    // One body file and one sidecar.
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 2);
}
