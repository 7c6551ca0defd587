//! Tests for the auth token service

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::domain::entities::token::{AuthTokenType, TokenKind};
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{InMemoryStore, KeyValueStore};
use crate::services::auth_token::{AuthTokenService, AuthTokenServiceConfig, AUTH_TOKEN_LENGTH};
use crate::services::token::TokenRateLimiter;

fn service(store: Arc<InMemoryStore>, max: i64) -> AuthTokenService<InMemoryStore> {
    AuthTokenService::new(store, AuthTokenServiceConfig::default().with_max_per_window(max))
}

async fn rate_counter(store: &InMemoryStore, user_id: Uuid) -> Option<String> {
    store
        .get(&format!("token_rate_limit:{}", user_id))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_token_persists_record() {
    let store = Arc::new(InMemoryStore::new());
    let service = service(store.clone(), 3);
    let user_id = Uuid::new_v4();

    let token = service
        .create_token(user_id, AuthTokenType::AccountConfirmation)
        .await
        .unwrap();

    assert_eq!(token.value.len(), AUTH_TOKEN_LENGTH);
    assert!(token.value.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(token.kind, TokenKind::Auth(AuthTokenType::AccountConfirmation));
    assert_eq!(token.user_id, user_id);

    let found = service.find_token(&token.value).await.unwrap().unwrap();
    assert_eq!(found, token);
    assert_eq!(rate_counter(&store, user_id).await.as_deref(), Some("1"));
}

#[tokio::test]
async fn test_token_ttl_follows_type() {
    let store = Arc::new(InMemoryStore::new());
    let service = service(store.clone(), 10);
    let user_id = Uuid::new_v4();

    let reset = service
        .create_token(user_id, AuthTokenType::PasswordReset)
        .await
        .unwrap();
    let ttl = store
        .ttl(&format!("token:{}", reset.value))
        .await
        .unwrap()
        .unwrap();
    assert!((3598..=3600).contains(&ttl));

    let confirm = service
        .create_token(user_id, AuthTokenType::AccountConfirmation)
        .await
        .unwrap();
    let ttl = store
        .ttl(&format!("token:{}", confirm.value))
        .await
        .unwrap()
        .unwrap();
    assert!(ttl > 86_000);
}

#[tokio::test]
async fn test_single_active_token_per_type() {
    let store = Arc::new(InMemoryStore::new());
    let service = service(store, 10);
    let user_id = Uuid::new_v4();

    let first = service
        .create_token(user_id, AuthTokenType::PasswordReset)
        .await
        .unwrap();
    let other_type = service
        .create_token(user_id, AuthTokenType::AccountConfirmation)
        .await
        .unwrap();
    let second = service
        .create_token(user_id, AuthTokenType::PasswordReset)
        .await
        .unwrap();

    assert!(service.find_token(&first.value).await.unwrap().is_none());
    assert!(service.find_token(&second.value).await.unwrap().is_some());
    assert!(service.find_token(&other_type.value).await.unwrap().is_some());
    assert!(second.version > first.version);
}

#[tokio::test]
async fn test_fourth_issuance_is_rate_limited() {
    let store = Arc::new(InMemoryStore::new());
    let service = service(store.clone(), 3);
    let limiter = TokenRateLimiter::new(store.clone());
    let user_id = Uuid::new_v4();

    for _ in 0..3 {
        service
            .create_token(user_id, AuthTokenType::AccountConfirmation)
            .await
            .unwrap();
    }

    let err = service
        .create_token(user_id, AuthTokenType::AccountConfirmation)
        .await
        .unwrap_err();

    let ttl = limiter.ttl(user_id).await.unwrap();
    match err {
        DomainError::Auth(AuthError::RateLimitExceeded {
            retry_after_seconds,
        }) => assert_eq!(retry_after_seconds, ttl),
        other => panic!("expected rate limit, got {:?}", other),
    }
    assert_eq!(rate_counter(&store, user_id).await.as_deref(), Some("3"));
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_lifts_after_window() {
    let store = Arc::new(InMemoryStore::new());
    let service = service(store, 1);
    let user_id = Uuid::new_v4();

    service
        .create_token(user_id, AuthTokenType::PasswordReset)
        .await
        .unwrap();
    assert!(service
        .create_token(user_id, AuthTokenType::PasswordReset)
        .await
        .is_err());

    tokio::time::advance(Duration::from_secs(3601)).await;
    assert!(service
        .create_token(user_id, AuthTokenType::PasswordReset)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_rate_limit_disabled() {
    let store = Arc::new(InMemoryStore::new());
    let mut config = AuthTokenServiceConfig::default().with_max_per_window(1);
    config.rate_limit_enabled = false;
    let service = AuthTokenService::new(store.clone(), config);
    let user_id = Uuid::new_v4();

    for _ in 0..5 {
        service
            .create_token(user_id, AuthTokenType::PasswordReset)
            .await
            .unwrap();
    }
    assert_eq!(rate_counter(&store, user_id).await, None);
}

#[tokio::test]
async fn test_consume_is_single_use() {
    let service = service(Arc::new(InMemoryStore::new()), 3);
    let user_id = Uuid::new_v4();
    let token = service
        .create_token(user_id, AuthTokenType::AccountConfirmation)
        .await
        .unwrap();

    let consumed = service
        .consume(&token.value, AuthTokenType::AccountConfirmation)
        .await
        .unwrap();
    assert_eq!(consumed.user_id, user_id);

    let again = service
        .consume(&token.value, AuthTokenType::AccountConfirmation)
        .await;
    assert!(matches!(again, Err(DomainError::Token(TokenError::InvalidToken))));
}

#[tokio::test]
async fn test_consume_rejects_wrong_type() {
    let service = service(Arc::new(InMemoryStore::new()), 3);
    let token = service
        .create_token(Uuid::new_v4(), AuthTokenType::AccountConfirmation)
        .await
        .unwrap();

    let result = service
        .consume(&token.value, AuthTokenType::PasswordReset)
        .await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::InvalidToken))));
    // Still usable for its real purpose
    assert!(service
        .consume(&token.value, AuthTokenType::AccountConfirmation)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_consume_rejects_outdated_version() {
    let store = Arc::new(InMemoryStore::new());
    let service = service(store.clone(), 3);
    let user_id = Uuid::new_v4();
    let token = service
        .create_token(user_id, AuthTokenType::PasswordReset)
        .await
        .unwrap();

    // Bump the counter behind the token's back
    store
        .incr(&format!("token_version:{}:auth:password_reset", user_id))
        .await
        .unwrap();

    let result = service.consume(&token.value, AuthTokenType::PasswordReset).await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::InvalidToken))));
    assert!(service.find_token(&token.value).await.unwrap().is_none());
}

#[tokio::test]
async fn test_consume_unknown_value() {
    let service = service(Arc::new(InMemoryStore::new()), 3);
    let result = service
        .consume("does-not-exist", AuthTokenType::PasswordReset)
        .await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::InvalidToken))));
}

#[tokio::test]
async fn test_delete_token() {
    let service = service(Arc::new(InMemoryStore::new()), 3);
    let token = service
        .create_token(Uuid::new_v4(), AuthTokenType::PasswordReset)
        .await
        .unwrap();

    service.delete_token(&token.value).await.unwrap();
    assert!(service.find_token(&token.value).await.unwrap().is_none());
}
