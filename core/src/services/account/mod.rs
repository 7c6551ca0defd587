//! Account flows built on the token and session services

mod config;
mod ports;
mod service;


pub use config::AccountServiceConfig;
pub use ports::{Mailer, OutboundEmail, PasswordHasher};
pub use service::AccountService;
