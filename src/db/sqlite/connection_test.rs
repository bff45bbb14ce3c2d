//! Tests for SQLite connection and migration management.

use crate::db::{Database, SqliteDatabase};

#[tokio::test(flavor = "multi_thread")]
async fn in_memory_database_migrates() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");

    // Schema is in place once migrations ran
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM car")
        .fetch_one(db.pool())
        .await
        .expect("car table should exist");
    assert_eq!(count, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn migrate_is_idempotent() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("First run should succeed");
    db.migrate().await.expect("Second run should succeed");
}

#[tokio::test(flavor = "multi_thread")]
async fn open_creates_database_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("yard.db");

    let db = SqliteDatabase::open(&path)
        .await
        .expect("Failed to open file database");
    db.migrate().await.expect("Migration should succeed");

    assert!(path.exists());
}
