//! Account service implementation

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::token::{AuthTokenType, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{KeyValueStore, UserRepository};
use crate::services::auth_token::AuthTokenService;
use crate::services::session::{JwtSessionService, SessionCredentials};

use super::config::AccountServiceConfig;
use super::ports::{Mailer, OutboundEmail, PasswordHasher};

/// Sign-up, confirmation, password and sign-in flows
pub struct AccountService<S, U, H, M>
where
    S: KeyValueStore + ?Sized,
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    M: Mailer + ?Sized,
{
    users: Arc<U>,
    hasher: Arc<H>,
    mailer: Arc<M>,
    auth_tokens: Arc<AuthTokenService<S>>,
    sessions: Arc<JwtSessionService<S>>,
    config: AccountServiceConfig,
}

impl<S, U, H, M> AccountService<S, U, H, M>
where
    S: KeyValueStore + ?Sized,
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    M: Mailer + ?Sized,
{
    pub fn new(
        users: Arc<U>,
        hasher: Arc<H>,
        mailer: Arc<M>,
        auth_tokens: Arc<AuthTokenService<S>>,
        sessions: Arc<JwtSessionService<S>>,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            users,
            hasher,
            mailer,
            auth_tokens,
            sessions,
            config,
        }
    }

    /// Registers an unverified user and emails a confirmation link
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The new user
    /// * `Err(AuthError::UserAlreadyExists)` - Email already registered
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.hasher.hash(password).await?;
        let user = self
            .users
            .create(User::new(name.trim(), email, password_hash))
            .await?;
        info!(user_id = %user.id, "User signed up");

        self.send_confirmation(&user).await?;
        Ok(user)
    }

    /// Sends a fresh confirmation link
    ///
    /// Unknown emails succeed silently.
    pub async fn resend_confirmation(&self, email: &str) -> Result<(), DomainError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            debug!("Confirmation resend requested for unknown email");
            return Ok(());
        };

        if user.is_verified() {
            return Err(DomainError::Validation {
                message: String::from("account is already confirmed"),
            });
        }

        self.send_confirmation(&user).await
    }

    /// Spends a confirmation token and verifies the account
    pub async fn confirm_account(&self, token: &str) -> Result<User, DomainError> {
        let token = self
            .auth_tokens
            .consume(token, AuthTokenType::AccountConfirmation)
            .await?;

        let user = self.users.verify_email(token.user_id).await?;
        info!(user_id = %user.id, role = %user.role, "Account confirmed");
        Ok(user)
    }

    /// Emails a password reset link
    ///
    /// Unknown emails succeed silently so the response does not reveal
    /// which addresses are registered.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), DomainError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = self
            .auth_tokens
            .create_token(user.id, AuthTokenType::PasswordReset)
            .await?;

        self.mailer
            .send(OutboundEmail {
                to: user.email.clone(),
                subject: String::from("Reset your password"),
                body: format!(
                    "Hi {},\n\nUse this link to choose a new password:\n{}\n\nIf you did not ask for this, ignore this email.",
                    user.name,
                    self.config.link("password-reset", &token.value)
                ),
            })
            .await
    }

    /// Spends a reset token, sets the new password and signs out everywhere
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), DomainError> {
        let token = self
            .auth_tokens
            .consume(token, AuthTokenType::PasswordReset)
            .await?;

        let password_hash = self.hasher.hash(new_password).await?;
        self.users
            .update_password(token.user_id, &password_hash)
            .await?;
        self.sessions.revoke_all_sessions(token.user_id).await?;

        info!(user_id = %token.user_id, "Password reset");
        Ok(())
    }

    /// Verifies credentials and starts a new session
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(User, TokenPair), DomainError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            warn!("Sign-in attempt for unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self.hasher.verify(password, &user.password_hash).await? {
            warn!(user_id = %user.id, "Sign-in attempt with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let pair = self.sessions.create_tokens(&user, None).await?;
        info!(user_id = %user.id, "User signed in");
        Ok((user, pair))
    }

    /// Revokes the presented session tokens
    pub async fn sign_out(&self, credentials: &SessionCredentials) -> Result<(), DomainError> {
        let presented: Vec<&str> = credentials
            .access_token
            .iter()
            .chain(credentials.refresh_token.iter())
            .map(String::as_str)
            .collect();

        let revoked = self.sessions.revoke_tokens(&presented).await?;
        debug!(revoked, "User signed out");
        Ok(())
    }

    /// Changes the password of a signed-in user
    ///
    /// Every existing session is revoked and a fresh pair is returned for the
    /// caller's own session.
    pub async fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> Result<TokenPair, DomainError> {
        if !self.hasher.verify(current_password, &user.password_hash).await? {
            warn!(user_id = %user.id, "Password change with wrong current password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let password_hash = self.hasher.hash(new_password).await?;
        self.users.update_password(user.id, &password_hash).await?;
        self.sessions.revoke_all_sessions(user.id).await?;

        info!(user_id = %user.id, "Password changed");
        self.sessions.create_tokens(user, None).await
    }

    /// Loads a user by ID
    pub async fn find_user(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("user {}", id)))
    }

    async fn send_confirmation(&self, user: &User) -> Result<(), DomainError> {
        let token = self
            .auth_tokens
            .create_token(user.id, AuthTokenType::AccountConfirmation)
            .await?;

        self.mailer
            .send(OutboundEmail {
                to: user.email.clone(),
                subject: String::from("Confirm your account"),
                body: format!(
                    "Hi {},\n\nConfirm your email address by opening this link:\n{}",
                    user.name,
                    self.config.link("confirm", &token.value)
                ),
            })
            .await
    }
}
