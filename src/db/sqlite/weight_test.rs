//! Tests for SqliteWeightRepository.

use crate::db::{Database, SqliteDatabase, WeightEntry};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn make_entry(id: &str, kilograms: f64, recorded_at: &str) -> WeightEntry {
    WeightEntry {
        id: id.to_string(),
        kilograms,
        recorded_at: recorded_at.to_string(),
        created_at: String::new(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn weight_latest_is_none_when_empty() {
    let db = setup_db().await;

    let latest = db.weights().latest().await.expect("Query should succeed");
    assert!(latest.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn weight_latest_follows_recorded_at_not_insert_order() {
    let db = setup_db().await;
    let weights = db.weights();

    // The newest reading is inserted first; insertion order must not
    // decide the result.
    weights
        .create(&make_entry("wt000001", 1180.5, "2026-03-02 08:30:00"))
        .await
        .unwrap();
    weights
        .create(&make_entry("wt000002", 990.0, "2026-03-01 08:30:00"))
        .await
        .unwrap();

    let latest = weights
        .latest()
        .await
        .expect("Query should succeed")
        .expect("Log should not be empty");

    assert_eq!(latest.id, "wt000001");
    assert_eq!(latest.recorded_at, "2026-03-02 08:30:00");
}

#[tokio::test(flavor = "multi_thread")]
async fn weight_create_defaults_recorded_at_to_now() {
    let db = setup_db().await;

    let created = db
        .weights()
        .create(&make_entry("", 1050.0, ""))
        .await
        .expect("Create should succeed");

    assert!(!created.recorded_at.is_empty());
    assert_eq!(created.recorded_at, created.created_at);
    assert_eq!(created.id.len(), 8);
}
