//! Per-request session evaluation
//!
//! A request moves through
//! `Unauthenticated → ClaimsDecoded → VersionChecked → UserHydrated`
//! and ends `Authorized` or `Rejected`. Callers without credentials stay
//! guests and are only turned away by the role gate.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::token::{Claims, JwtTokenType, TokenPair};
use crate::domain::entities::user::{Role, User};
use crate::errors::{AuthError, DomainError};
use crate::repositories::{KeyValueStore, UserRepository};

use super::jwt_session::JwtSessionService;

/// Raw credentials presented with a request
#[derive(Debug, Clone, Default)]
pub struct SessionCredentials {
    /// From the access cookie or an `Authorization: Bearer` header
    pub access_token: Option<String>,
    /// From the refresh cookie
    pub refresh_token: Option<String>,
}

impl SessionCredentials {
    pub fn new(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}

/// Stage a request reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    ClaimsDecoded,
    VersionChecked,
    UserHydrated,
    Authorized,
    Rejected(AuthError),
}

/// Outcome of evaluating one request
#[derive(Debug, Clone)]
pub struct Session {
    pub state: SessionState,
    /// Effective role, `guest` unless a user was hydrated
    pub role: Role,
    pub user: Option<User>,
    /// Pair minted by a transparent refresh; the caller must set it as cookies
    pub reissued: Option<TokenPair>,
}

impl Session {
    fn guest() -> Self {
        Self {
            state: SessionState::Unauthenticated,
            role: Role::Guest,
            user: None,
            reissued: None,
        }
    }

    fn reject(mut self, reason: AuthError) -> Self {
        warn!(
            user_id = ?self.user.as_ref().map(|u| u.id),
            reached = ?self.state,
            "Session rejected: {}",
            reason
        );
        self.state = SessionState::Rejected(reason);
        self
    }

    fn authorize(mut self, permitted: &[Role]) -> Self {
        if permitted.is_empty() || permitted.contains(&self.role) {
            self.state = SessionState::Authorized;
            self
        } else {
            self.reject(AuthError::RoleNotPermitted)
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.state == SessionState::Authorized
    }

    /// Reason for rejection, if rejected
    pub fn rejection(&self) -> Option<&AuthError> {
        match &self.state {
            SessionState::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Hydrates and authorizes sessions
pub struct SessionLifecycle<S, U>
where
    S: KeyValueStore + ?Sized,
    U: UserRepository + ?Sized,
{
    sessions: Arc<JwtSessionService<S>>,
    users: Arc<U>,
}

impl<S, U> SessionLifecycle<S, U>
where
    S: KeyValueStore + ?Sized,
    U: UserRepository + ?Sized,
{
    pub fn new(sessions: Arc<JwtSessionService<S>>, users: Arc<U>) -> Self {
        Self { sessions, users }
    }

    /// Evaluates the credentials of one request against the permitted roles
    ///
    /// An empty `permitted` slice means the route is open to everyone,
    /// guests included.
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - Authorized or rejected session
    /// * `Err(DomainError)` - Store or user storage failure
    pub async fn hydrate(
        &self,
        credentials: &SessionCredentials,
        permitted: &[Role],
    ) -> Result<Session, DomainError> {
        let mut session = Session::guest();

        let access = self
            .decode(credentials.access_token.as_deref(), JwtTokenType::Access)
            .await?;
        let refresh = self
            .decode(credentials.refresh_token.as_deref(), JwtTokenType::Refresh)
            .await?;

        let Some(subject) = access.as_ref().or(refresh.as_ref()).map(|c| c.sub) else {
            return Ok(session.authorize(permitted));
        };
        session.state = SessionState::ClaimsDecoded;

        for claims in access.iter().chain(refresh.iter()) {
            let current = self
                .sessions
                .get_current_version(claims.sub, claims.typ)
                .await?;
            if claims.version != current || claims.sub != subject {
                return Ok(session.reject(AuthError::StaleCredential));
            }
        }
        session.state = SessionState::VersionChecked;

        let Some(user) = self.users.find_by_id(subject).await? else {
            return Ok(session.reject(AuthError::UserNoLongerExists));
        };
        session.state = SessionState::UserHydrated;

        if let Some(claims) = &access {
            session.role = claims.role;
        } else if let Some(refresh_claims) = &refresh {
            session.reissued = Some(self.refresh(&user, refresh_claims).await?);
            session.role = user.role;
        }
        session.user = Some(user);

        Ok(session.authorize(permitted))
    }

    async fn decode(
        &self,
        raw: Option<&str>,
        expected: JwtTokenType,
    ) -> Result<Option<Claims>, DomainError> {
        let Some(raw) = raw.filter(|r| !r.is_empty()) else {
            return Ok(None);
        };
        match self.sessions.decode_token(raw).await? {
            Some(claims) if claims.typ == expected => Ok(Some(claims)),
            Some(_) => {
                debug!(expected = expected.as_str(), "Token presented in the wrong slot");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Mints a new pair on the same session horizon and spends the old refresh token
    async fn refresh(&self, user: &User, refresh_claims: &Claims) -> Result<TokenPair, DomainError> {
        let anchor = self.sessions.issuer().continue_session(refresh_claims);
        let pair = self.sessions.create_tokens(user, Some(anchor)).await?;
        self.sessions.delete_record(&refresh_claims.jti).await?;
        info!(user_id = %user.id, "Session transparently refreshed");
        Ok(pair)
    }
}
