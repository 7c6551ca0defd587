//! Unit tests for the user entity

use crate::domain::entities::user::{normalize_email, Role, User};

#[test]
fn test_new_user_is_unverified() {
    let user = User::new("Ada", "  Ada@Example.COM ", "hash");

    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.role, Role::Unverified);
    assert!(!user.is_verified());
}

#[test]
fn test_verify_email_promotes_unverified() {
    let mut user = User::new("Ada", "ada@example.com", "hash");
    user.verify_email();

    assert!(user.is_verified());
    assert_eq!(user.role, Role::User);
}

#[test]
fn test_verify_email_keeps_admin_role() {
    let mut user = User::new("Root", "root@example.com", "hash");
    user.role = Role::Admin;
    user.verify_email();

    assert_eq!(user.role, Role::Admin);
}

#[test]
fn test_role_ordering() {
    assert!(Role::Guest < Role::Unverified);
    assert!(Role::Unverified < Role::User);
    assert!(Role::User < Role::Admin);
    assert_eq!(Role::default(), Role::Guest);
}

#[test]
fn test_role_round_trip_through_str() {
    for role in [Role::Guest, Role::Unverified, Role::User, Role::Admin] {
        assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
    }
    assert!("root".parse::<Role>().is_err());
}

#[test]
fn test_normalize_email() {
    assert_eq!(normalize_email(" Bob@Mail.Org"), "bob@mail.org");
}
