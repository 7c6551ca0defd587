//! JWT signing and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, warn};
use uuid::Uuid;

use gk_shared::config::JwtConfig;

use crate::domain::entities::token::{Claims, JwtTokenType, SessionAnchor, SignedToken};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};

/// Issues and validates signed session tokens
///
/// The issuer holds no per-session state; the lifetime bound of a session
/// travels in a [`SessionAnchor`] and in the `sxp` claim.
pub struct JwtIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    algorithm: Algorithm,
    issuer: String,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
    session_max_age: Duration,
}

impl JwtIssuer {
    /// Creates an issuer from configuration
    ///
    /// # Returns
    ///
    /// A new `JwtIssuer`, or `DomainError::Internal` if the algorithm is not an
    /// HMAC algorithm
    pub fn new(config: &JwtConfig) -> Result<Self, DomainError> {
        let algorithm = match config.algorithm.to_uppercase().as_str() {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            other => {
                return Err(DomainError::internal(format!(
                    "unsupported JWT algorithm '{}'",
                    other
                )))
            }
        };

        if config.is_using_default_secret() {
            warn!("JWT secret is the built-in default; set GATEKEEPER__AUTH__JWT__SECRET outside development");
        }

        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_aud = false;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            algorithm,
            issuer: config.issuer.clone(),
            access_lifetime: Duration::seconds(config.access_token_expiry),
            refresh_lifetime: Duration::seconds(config.refresh_token_expiry),
            session_max_age: Duration::seconds(config.session_max_age),
        })
    }

    /// Lifetime of a token type before the session cap is applied
    pub fn lifetime(&self, token_type: JwtTokenType) -> Duration {
        match token_type {
            JwtTokenType::Access => self.access_lifetime,
            JwtTokenType::Refresh => self.refresh_lifetime,
        }
    }

    /// Anchor for a new session starting now
    pub fn start_session(&self) -> SessionAnchor {
        SessionAnchor::start(Utc::now(), self.session_max_age)
    }

    /// Anchor for a refresh step, inheriting the presented token's horizon
    pub fn continue_session(&self, refresh_claims: &Claims) -> SessionAnchor {
        SessionAnchor::inherit(Utc::now(), refresh_claims.session_max_expiry())
    }

    /// Generates a signed token
    ///
    /// # Arguments
    ///
    /// * `user` - Subject of the token
    /// * `token_type` - Access or refresh
    /// * `version` - Current version counter for (user, jwt, type)
    /// * `anchor` - Session anchor bounding the expiry
    pub fn generate_token(
        &self,
        user: &User,
        token_type: JwtTokenType,
        version: i64,
        anchor: &SessionAnchor,
    ) -> Result<SignedToken, DomainError> {
        let expires_at = anchor.expiry_for(self.lifetime(token_type));
        let claims = Claims {
            jti: Uuid::new_v4().to_string(),
            sub: user.id,
            iat: anchor.issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
            version,
            role: user.role,
            typ: token_type,
            sxp: anchor.max_expiry.timestamp(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;

        Ok(SignedToken { token, claims })
    }

    /// Validates signature, expiry and issuer with zero leeway
    ///
    /// # Returns
    ///
    /// The claims, or `None` on any failure
    pub fn validate_token(&self, raw: &str) -> Option<Claims> {
        match decode::<Claims>(raw, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!("JWT rejected: {}", e);
                None
            }
        }
    }
}
