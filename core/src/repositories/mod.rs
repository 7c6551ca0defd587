//! Repository and store interfaces, with in-memory implementations.

pub mod store;
pub mod user;

pub use store::{InMemoryStore, KeyValueStore};
pub use user::{InMemoryUserRepository, UserRepository};
