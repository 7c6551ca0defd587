//! Tests for the JWT session service

use crate::domain::entities::token::{JwtTokenType, TokenKind};
use crate::domain::entities::user::Role;
use crate::repositories::KeyValueStore;
use crate::services::token::TokenStore;

use super::Fixture;

#[tokio::test]
async fn test_created_pair_is_decodable_and_store_backed() {
    let fx = Fixture::new();
    let user = fx.user(Role::User).await;

    let pair = fx.sessions.create_tokens(&user, None).await.unwrap();

    let access = fx.sessions.decode_token(&pair.access.token).await.unwrap().unwrap();
    let refresh = fx.sessions.decode_token(&pair.refresh.token).await.unwrap().unwrap();
    assert_eq!(access.typ, JwtTokenType::Access);
    assert_eq!(refresh.typ, JwtTokenType::Refresh);
    assert_eq!(access.sxp, refresh.sxp);

    let tokens = TokenStore::new(fx.store.clone());
    let record = tokens.find_token(&access.jti).await.unwrap().unwrap();
    assert_eq!(record.kind, TokenKind::Jwt(JwtTokenType::Access));
    assert_eq!(record.user_id, user.id);
    assert_eq!(record.version, access.version);
}

#[tokio::test]
async fn test_versions_bumped_on_each_issue() {
    let fx = Fixture::new();
    let user = fx.user(Role::User).await;

    let first = fx.sessions.create_tokens(&user, None).await.unwrap();
    let second = fx.sessions.create_tokens(&user, None).await.unwrap();

    assert!(second.access.claims.version > first.access.claims.version);
    assert_eq!(
        fx.sessions
            .get_current_version(user.id, JwtTokenType::Access)
            .await
            .unwrap(),
        second.access.claims.version
    );
    assert_eq!(
        fx.sessions
            .get_current_version(user.id, JwtTokenType::Refresh)
            .await
            .unwrap(),
        second.refresh.claims.version
    );
}

#[tokio::test]
async fn test_decode_requires_live_record() {
    let fx = Fixture::new();
    let user = fx.user(Role::User).await;
    let pair = fx.sessions.create_tokens(&user, None).await.unwrap();

    fx.store
        .delete(&format!("token:{}", pair.access.claims.jti))
        .await
        .unwrap();

    assert!(fx.sessions.decode_token(&pair.access.token).await.unwrap().is_none());
    assert!(fx.sessions.decode_token(&pair.refresh.token).await.unwrap().is_some());
}

#[tokio::test]
async fn test_decode_rejects_garbage() {
    let fx = Fixture::new();
    assert!(fx.sessions.decode_token("garbage").await.unwrap().is_none());
}

#[tokio::test]
async fn test_revoke_tokens_deletes_records() {
    let fx = Fixture::new();
    let user = fx.user(Role::User).await;
    let pair = fx.sessions.create_tokens(&user, None).await.unwrap();

    let revoked = fx
        .sessions
        .revoke_tokens(&[&pair.access.token, &pair.refresh.token, "junk"])
        .await
        .unwrap();

    assert_eq!(revoked, 2);
    assert!(fx.sessions.decode_token(&pair.access.token).await.unwrap().is_none());
    assert!(fx.sessions.decode_token(&pair.refresh.token).await.unwrap().is_none());
}

#[tokio::test]
async fn test_revoke_all_sessions_bumps_versions_and_clears_records() {
    let fx = Fixture::new();
    let user = fx.user(Role::User).await;
    let pair = fx.sessions.create_tokens(&user, None).await.unwrap();

    fx.sessions.revoke_all_sessions(user.id).await.unwrap();

    let access_version = fx
        .sessions
        .get_current_version(user.id, JwtTokenType::Access)
        .await
        .unwrap();
    assert!(access_version > pair.access.claims.version);
    assert!(fx.sessions.decode_token(&pair.access.token).await.unwrap().is_none());

    let tokens = TokenStore::new(fx.store.clone());
    assert!(tokens.find_tokens_by_user_id(user.id).await.unwrap().is_empty());
}
