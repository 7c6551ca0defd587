//! Store key layout

use uuid::Uuid;

use crate::domain::entities::token::TokenKind;

pub(crate) fn token_key(value: &str) -> String {
    format!("token:{}", value)
}

pub(crate) fn user_tokens_key(user_id: Uuid) -> String {
    format!("user_tokens:{}", user_id)
}

pub(crate) fn version_key(user_id: Uuid, kind: TokenKind) -> String {
    format!(
        "token_version:{}:{}:{}",
        user_id,
        kind.category().as_str(),
        kind.type_str()
    )
}

pub(crate) fn rate_limit_key(user_id: Uuid) -> String {
    format!("token_rate_limit:{}", user_id)
}
