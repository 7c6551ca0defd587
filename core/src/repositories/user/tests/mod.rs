//! Unit tests for the in-memory user repository

use uuid::Uuid;

use crate::domain::entities::user::{Role, User};
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{InMemoryUserRepository, UserRepository};

#[tokio::test]
async fn test_create_and_find() {
    let repo = InMemoryUserRepository::new();
    let user = repo
        .create(User::new("Ada", "ada@example.com", "hash"))
        .await
        .unwrap();

    let by_id = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "ada@example.com");

    let by_email = repo.find_by_email("ADA@example.com ").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(user.id));
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let repo = InMemoryUserRepository::new();
    repo.create(User::new("Ada", "ada@example.com", "hash"))
        .await
        .unwrap();

    let result = repo
        .create(User::new("Other Ada", "Ada@Example.com", "hash"))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
}

#[tokio::test]
async fn test_verify_email_updates_role() {
    let user = User::new("Ada", "ada@example.com", "hash");
    let repo = InMemoryUserRepository::with_users([user.clone()]);

    let verified = repo.verify_email(user.id).await.unwrap();
    assert_eq!(verified.role, Role::User);
    assert!(verified.is_verified());

    let missing = repo.verify_email(Uuid::new_v4()).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_update_password() {
    let user = User::new("Ada", "ada@example.com", "old");
    let repo = InMemoryUserRepository::with_users([user.clone()]);

    repo.update_password(user.id, "new").await.unwrap();
    assert_eq!(
        repo.find_by_id(user.id).await.unwrap().unwrap().password_hash,
        "new"
    );
}
