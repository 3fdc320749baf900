//! Integration tests for store provisioning and per-record writes against
//! the in-memory backend.

use std::sync::Arc;

use assert_matches::assert_matches;

use lostfound_core::catalog::MUNICIPALITIES;
use lostfound_core::synthesizer::RecordSynthesizer;
use lostfound_db::{
    ensure_store, MemoryStore, ProvisioningError, StoreError, StoreSettings, WriteError,
};

fn settings() -> StoreSettings {
    StoreSettings::default()
}

// ---------------------------------------------------------------------------
// Test: provisioning is idempotent
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ensure_store_twice_creates_one_database_and_container() {
    let store = Arc::new(MemoryStore::new());
    let settings = settings();

    let first = ensure_store(store.clone(), &settings).await;
    let second = ensure_store(store.clone(), &settings).await;

    assert!(first.is_ok());
    let handle = second.expect("second ensure should not fail");
    assert_eq!(handle.settings(), &settings);
    assert_eq!(store.database_count(), 1);
    assert_eq!(store.container_count("MaterializedViewsDB"), 1);
    assert_eq!(
        store.partition_key_path("MaterializedViewsDB", "LostItems").as_deref(),
        Some("/createUserPlace")
    );
}

#[tokio::test]
async fn both_handles_write_into_the_same_container() {
    let store = Arc::new(MemoryStore::new());
    let a = ensure_store(store.clone(), &settings()).await.unwrap();
    let b = ensure_store(store.clone(), &settings()).await.unwrap();

    let mut synth = RecordSynthesizer::seeded(11);
    a.write_record(&synth.generate()).await.unwrap();
    b.write_record(&synth.generate()).await.unwrap();

    assert_eq!(store.documents("MaterializedViewsDB", "LostItems").len(), 2);
}

#[tokio::test]
async fn unreachable_store_fails_provisioning() {
    let store = Arc::new(MemoryStore::offline());
    let err = ensure_store(store, &settings()).await.err().unwrap();
    assert_matches!(err, ProvisioningError::Unreachable(_));
}

// ---------------------------------------------------------------------------
// Test: writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn written_document_is_keyed_by_id_under_municipality() {
    let store = Arc::new(MemoryStore::new());
    let handle = ensure_store(store.clone(), &settings()).await.unwrap();
    let record = RecordSynthesizer::seeded(5).generate();

    let receipt = handle.write_record(&record).await.unwrap();

    assert_eq!(receipt.id, record.id);
    assert_eq!(receipt.partition_key, record.create_user_place);
    let docs = store.documents("MaterializedViewsDB", "LostItems");
    assert_eq!(docs.len(), 1);
    let (partition, id, doc) = &docs[0];
    assert_eq!(id, &record.id);
    assert!(MUNICIPALITIES.contains(&partition.as_str()));
    assert_eq!(doc["createUserPlace"], record.create_user_place.as_str());
    assert_eq!(doc["isValuables"], record.is_valuables);
}

#[tokio::test]
async fn writing_same_record_twice_conflicts() {
    let store = Arc::new(MemoryStore::new());
    let handle = ensure_store(store, &settings()).await.unwrap();
    let record = RecordSynthesizer::seeded(6).generate();

    handle.write_record(&record).await.unwrap();
    let err = handle.write_record(&record).await.unwrap_err();
    assert_eq!(err, WriteError::Conflict);
}

#[tokio::test]
async fn empty_partition_key_is_rejected_without_a_store_call() {
    let store = Arc::new(MemoryStore::new());
    let handle = ensure_store(store.clone(), &settings()).await.unwrap();
    let mut record = RecordSynthesizer::seeded(7).generate();
    record.create_user_place.clear();

    let err = handle.write_record(&record).await.unwrap_err();
    assert_matches!(err, WriteError::InvalidPartitionKey(_));
    assert_eq!(store.write_attempts(), 0);
}

#[tokio::test]
async fn failed_write_does_not_affect_neighbours() {
    let store = Arc::new(MemoryStore::new());
    store.fail_nth_write(2, StoreError::Conflict);
    let handle = ensure_store(store.clone(), &settings()).await.unwrap();
    let mut synth = RecordSynthesizer::seeded(8);
    let records: Vec<_> = (0..3).map(|_| synth.generate()).collect();

    let results: Vec<_> = {
        let mut out = Vec::new();
        for record in &records {
            out.push(handle.write_record(record).await);
        }
        out
    };

    assert!(results[0].is_ok());
    assert_eq!(results[1], Err(WriteError::Conflict));
    assert!(results[2].is_ok());

    let stored: Vec<_> = store
        .documents("MaterializedViewsDB", "LostItems")
        .into_iter()
        .map(|(_, id, _)| id)
        .collect();
    assert!(stored.contains(&records[0].id));
    assert!(!stored.contains(&records[1].id));
    assert!(stored.contains(&records[2].id));
}

#[tokio::test]
async fn throttled_write_carries_retry_hint() {
    let store = Arc::new(MemoryStore::new());
    store.fail_nth_write(
        1,
        StoreError::Throttled {
            retry_after_ms: Some(300),
        },
    );
    let handle = ensure_store(store, &settings()).await.unwrap();

    let err = handle
        .write_record(&RecordSynthesizer::seeded(9).generate())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        WriteError::Throttled {
            retry_after_ms: Some(300)
        }
    );
}
