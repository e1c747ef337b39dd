//! Database migration tests
//!
//! Tests to ensure migrations run correctly and database schema is valid

use assert_matches::assert_matches;
use kawa_forum::backend::store::{SqliteStore, StoreError, UserStore};
use kawa_forum::shared::forum::User;

#[tokio::test]
async fn test_migrations_run_successfully() {
    let store = SqliteStore::in_memory().await.expect("in-memory store");
    let result = store.migrate().await;
    assert!(result.is_ok(), "Migrations should be idempotent");
}

#[tokio::test]
async fn test_forum_tables_exist() {
    let store = SqliteStore::in_memory().await.unwrap();

    for table in [
        "users",
        "discussions",
        "posts",
        "likes",
        "tags",
        "discussion_tags",
        "notifications",
        "reports",
        "meta",
        "chats",
    ] {
        let result = sqlx::query(&format!("SELECT 1 FROM {} LIMIT 1", table))
            .execute(store.pool())
            .await;
        assert!(result.is_ok(), "{} table should exist", table);
    }
}

#[tokio::test]
async fn test_unique_login_is_a_conflict() {
    let store = SqliteStore::in_memory().await.unwrap();

    let mut first = User::new("alice", "alice@example.com", "hash");
    store.create_user(&mut first).await.unwrap();
    assert!(first.id > 0);

    let mut second = User::new("alice", "alice2@example.com", "hash");
    let err = store.create_user(&mut second).await.unwrap_err();
    assert_matches!(err, StoreError::Conflict(_));
}

#[tokio::test]
async fn test_file_database_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forum.db");
    let url = format!("sqlite://{}", path.display());

    {
        let store = SqliteStore::connect(&url).await.unwrap();
        let mut user = User::new("alice", "alice@example.com", "hash");
        store.create_user(&mut user).await.unwrap();
        store.pool().close().await;
    }

    let store = SqliteStore::connect(&url).await.unwrap();
    let user = store.get_user_by_login("alice").await.unwrap();
    assert_eq!(user.email, "alice@example.com");
    store.pool().close().await;
}
