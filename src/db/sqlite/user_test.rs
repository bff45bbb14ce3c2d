//! Tests for SqliteUserRepository.

use crate::db::{Database, DbError, SqliteDatabase, UserProfile};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn make_user(clerk_id: &str) -> UserProfile {
    UserProfile {
        id: String::new(),
        clerk_id: clerk_id.to_string(),
        email: Some("ops@yard.example".to_string()),
        first_name: Some("Sam".to_string()),
        last_name: None,
        created_at: String::new(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn user_create_and_find_by_clerk_id() {
    let db = setup_db().await;

    db.users()
        .create(&make_user("abc123"))
        .await
        .expect("Create should succeed");

    let found = db
        .users()
        .find_by_clerk_id("abc123")
        .await
        .expect("Lookup should succeed")
        .expect("Profile should exist");

    assert_eq!(found.clerk_id, "abc123");
    assert_eq!(found.email, Some("ops@yard.example".to_string()));
}

#[tokio::test(flavor = "multi_thread")]
async fn user_unknown_clerk_id_is_none() {
    let db = setup_db().await;

    let found = db
        .users()
        .find_by_clerk_id("nobody")
        .await
        .expect("Lookup should succeed");
    assert!(found.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn user_clerk_id_is_unique() {
    let db = setup_db().await;

    db.users().create(&make_user("abc123")).await.unwrap();
    let result = db.users().create(&make_user("abc123")).await;

    assert!(matches!(result, Err(DbError::AlreadyExists { .. })));
}
