//! # Gatekeeper Core
//!
//! Core session and token logic for the Gatekeeper server.
//! This crate contains domain entities, the token/session services, repository
//! and port interfaces, in-memory adapters, and error types that form the
//! foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
