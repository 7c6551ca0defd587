//! Unit tests for the in-memory key-value store

use std::time::Duration;

use crate::repositories::store::{InMemoryStore, KeyValueStore};

#[tokio::test]
async fn test_get_set_delete() {
    let store = InMemoryStore::new();

    assert_eq!(store.get("k").await.unwrap(), None);
    store.set("k", "v").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    assert!(store.exists("k").await.unwrap());

    assert!(store.delete("k").await.unwrap());
    assert!(!store.delete("k").await.unwrap());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_set_nx_only_writes_once() {
    let store = InMemoryStore::new();

    assert!(store.set_nx("k", "1").await.unwrap());
    assert!(!store.set_nx("k", "2").await.unwrap());
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("1"));
}

#[tokio::test]
async fn test_incr_counts_from_zero() {
    let store = InMemoryStore::new();

    assert_eq!(store.incr("c").await.unwrap(), 1);
    assert_eq!(store.incr("c").await.unwrap(), 2);

    store.set("text", "abc").await.unwrap();
    assert!(store.incr("text").await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_keys_expire_lazily() {
    let store = InMemoryStore::new();
    store.set_with_expiry("k", "v", 10).await.unwrap();

    assert_eq!(store.ttl("k").await.unwrap(), Some(10));

    tokio::time::advance(Duration::from_secs(4)).await;
    assert_eq!(store.ttl("k").await.unwrap(), Some(6));

    tokio::time::advance(Duration::from_secs(6)).await;
    assert_eq!(store.get("k").await.unwrap(), None);
    assert_eq!(store.ttl("k").await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_incr_preserves_ttl() {
    let store = InMemoryStore::new();
    store.incr("c").await.unwrap();
    assert!(store.expire("c", 60).await.unwrap());

    store.incr("c").await.unwrap();
    assert_eq!(store.ttl("c").await.unwrap(), Some(60));

    assert!(!store.expire("missing", 60).await.unwrap());
}

#[tokio::test]
async fn test_ttl_of_persistent_key_is_none() {
    let store = InMemoryStore::new();
    store.set("k", "v").await.unwrap();

    assert_eq!(store.ttl("k").await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_set_indexed_writes_record_and_index() {
    let store = InMemoryStore::new();

    store
        .set_indexed("token:a", "{}", 30, "user_tokens:u", "a")
        .await
        .unwrap();
    store
        .set_indexed("token:b", "{}", 10, "user_tokens:u", "b")
        .await
        .unwrap();

    let mut members = store.set_members("user_tokens:u").await.unwrap();
    members.sort();
    assert_eq!(members, vec!["a", "b"]);

    // Index lives as long as its longest record
    assert_eq!(store.ttl("user_tokens:u").await.unwrap(), Some(30));
    assert_eq!(store.ttl("token:b").await.unwrap(), Some(10));
}

#[tokio::test]
async fn test_delete_indexed_removes_member() {
    let store = InMemoryStore::new();
    store
        .set_indexed("token:a", "{}", 30, "user_tokens:u", "a")
        .await
        .unwrap();

    assert!(store
        .delete_indexed("token:a", "user_tokens:u", "a")
        .await
        .unwrap());
    assert!(!store.exists("token:a").await.unwrap());
    assert!(store.set_members("user_tokens:u").await.unwrap().is_empty());

    // Idempotent
    assert!(!store
        .delete_indexed("token:a", "user_tokens:u", "a")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_wrong_type_is_store_error() {
    let store = InMemoryStore::new();
    store
        .set_indexed("token:a", "{}", 30, "user_tokens:u", "a")
        .await
        .unwrap();

    assert!(store.get("user_tokens:u").await.is_err());
    assert!(store.set_members("token:a").await.is_err());
}
