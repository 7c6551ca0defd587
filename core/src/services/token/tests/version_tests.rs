//! Tests for the token version authority

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::token::{AuthTokenType, JwtTokenType, TokenKind};
use crate::repositories::{InMemoryStore, KeyValueStore};
use crate::services::token::TokenVersionAuthority;

#[tokio::test]
async fn test_find_initializes_to_one() {
    let store = Arc::new(InMemoryStore::new());
    let versions = TokenVersionAuthority::new(store.clone());
    let user_id = Uuid::new_v4();
    let kind = TokenKind::Jwt(JwtTokenType::Access);

    assert_eq!(versions.find(user_id, kind).await.unwrap(), 1);
    assert_eq!(versions.find(user_id, kind).await.unwrap(), 1);

    let key = format!("token_version:{}:jwt:access", user_id);
    assert_eq!(store.get(&key).await.unwrap().as_deref(), Some("1"));
}

#[tokio::test]
async fn test_increment_on_absent_key_yields_one() {
    let versions = TokenVersionAuthority::new(Arc::new(InMemoryStore::new()));
    let kind = TokenKind::Auth(AuthTokenType::PasswordReset);

    assert_eq!(versions.increment(Uuid::new_v4(), kind).await.unwrap(), 1);
}

#[tokio::test]
async fn test_versions_are_strictly_increasing() {
    let versions = TokenVersionAuthority::new(Arc::new(InMemoryStore::new()));
    let user_id = Uuid::new_v4();
    let kind = TokenKind::Jwt(JwtTokenType::Refresh);

    let mut previous = versions.find(user_id, kind).await.unwrap();
    for _ in 0..5 {
        let next = versions.increment(user_id, kind).await.unwrap();
        assert!(next > previous);
        assert_eq!(versions.find(user_id, kind).await.unwrap(), next);
        previous = next;
    }
}

#[tokio::test]
async fn test_counters_are_independent_per_kind_and_user() {
    let versions = TokenVersionAuthority::new(Arc::new(InMemoryStore::new()));
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let access = TokenKind::Jwt(JwtTokenType::Access);
    let refresh = TokenKind::Jwt(JwtTokenType::Refresh);

    versions.increment(alice, access).await.unwrap();
    versions.increment(alice, access).await.unwrap();

    assert_eq!(versions.find(alice, access).await.unwrap(), 2);
    assert_eq!(versions.find(alice, refresh).await.unwrap(), 1);
    assert_eq!(versions.find(bob, access).await.unwrap(), 1);
}
