//! MySQL implementation of the UserRepository trait.
//!
//! Users are stored in the `users` table; ids are `CHAR(36)` UUID strings and
//! roles their lowercase names. Emails are normalized before they reach SQL.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use gk_core::domain::entities::user::{normalize_email, Role, User};
use gk_core::errors::{AuthError, DomainError};
use gk_core::repositories::UserRepository;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, email_verified_at, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::store(format!("Failed to get id: {}", e)))?;
        let role: String = row
            .try_get("role")
            .map_err(|e| DomainError::store(format!("Failed to get role: {}", e)))?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::store(format!("Invalid UUID: {}", e)))?,
            name: row
                .try_get("name")
                .map_err(|e| DomainError::store(format!("Failed to get name: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::store(format!("Failed to get email: {}", e)))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::store(format!("Failed to get password_hash: {}", e)))?,
            role: Role::from_str(&role)
                .map_err(|_| DomainError::store(format!("Unknown role '{}'", role)))?,
            email_verified_at: row
                .try_get::<Option<DateTime<Utc>>, _>("email_verified_at")
                .map_err(|e| {
                    DomainError::store(format!("Failed to get email_verified_at: {}", e))
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::store(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::store(format!("Failed to get updated_at: {}", e)))?,
        })
    }

    async fn fetch_one_where(
        &self,
        clause: &str,
        value: String,
    ) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = ? LIMIT 1", USER_COLUMNS, clause);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Database query failed: {}", e)))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("id", id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("email", normalize_email(email)).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, name, email, password_hash, role,
                email_verified_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(normalize_email(&user.email))
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.email_verified_at)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::Auth(AuthError::UserAlreadyExists)
                }
                other => DomainError::store(format!("Failed to create user: {}", other)),
            })?;

        Ok(user)
    }

    async fn verify_email(&self, id: Uuid) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                email_verified_at = COALESCE(email_verified_at, ?),
                role = CASE WHEN role = 'unverified' THEN 'user' ELSE role END,
                updated_at = ?
            WHERE id = ?
        "#;

        let now = Utc::now();
        sqlx::query(query)
            .bind(now)
            .bind(now)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to verify user: {}", e)))?;

        // MySQL reports zero affected rows for a no-op update, so re-read instead
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("user {}", id)))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to update password: {}", e)))?;

        if result.rows_affected() == 0 && self.find_by_id(id).await?.is_none() {
            return Err(DomainError::not_found(format!("user {}", id)));
        }

        Ok(())
    }
}
