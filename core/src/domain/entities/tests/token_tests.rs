//! Unit tests for token entities

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{
    AuthTokenType, JwtTokenType, SessionAnchor, Token, TokenCategory, TokenKind,
};

#[test]
fn test_token_kind_serializes_category_and_type() {
    let kind = TokenKind::Auth(AuthTokenType::PasswordReset);
    let json = serde_json::to_value(kind).unwrap();

    assert_eq!(json["category"], "auth");
    assert_eq!(json["type"], "password_reset");

    let back: TokenKind = serde_json::from_value(json).unwrap();
    assert_eq!(back, kind);
}

#[test]
fn test_token_kind_category() {
    assert_eq!(
        TokenKind::from(AuthTokenType::AccountConfirmation).category(),
        TokenCategory::Auth
    );
    assert_eq!(TokenKind::from(JwtTokenType::Refresh).category(), TokenCategory::Jwt);
    assert_eq!(TokenKind::Jwt(JwtTokenType::Access).to_string(), "jwt:access");
}

#[test]
fn test_token_record_json_shape() {
    let user_id = Uuid::new_v4();
    let token = Token::new(
        "abc",
        user_id,
        TokenKind::Jwt(JwtTokenType::Access),
        4,
        Utc::now() + Duration::minutes(15),
    );

    let json = serde_json::to_string(&token).unwrap();
    assert!(json.contains(r#""kind":{"category":"jwt","type":"access"}"#));

    let parsed: Token = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, token);
    assert!(!parsed.is_expired());
    assert!(parsed.seconds_to_expiry() > 890);
}

#[test]
fn test_anchor_caps_expiry_at_horizon() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let anchor = SessionAnchor::start(start, Duration::hours(1));

    assert_eq!(anchor.expiry_for(Duration::minutes(15)), start + Duration::minutes(15));
    assert_eq!(anchor.expiry_for(Duration::days(7)), start + Duration::hours(1));
}

#[test]
fn test_inherited_anchor_keeps_horizon() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let first = SessionAnchor::start(start, Duration::hours(1));

    let later = SessionAnchor::inherit(start + Duration::minutes(50), first.max_expiry);
    assert_eq!(later.expiry_for(Duration::minutes(15)), first.max_expiry);
}
