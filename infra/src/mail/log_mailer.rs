//! Mailer that writes outbound email to the log
//!
//! Stands in for an SMTP relay in development deployments; confirmation and
//! password-reset links show up in the server log.

use async_trait::async_trait;
use tracing::info;

use gk_core::errors::DomainError;
use gk_core::services::{Mailer, OutboundEmail};

#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), DomainError> {
        info!(
            to = %email.to,
            subject = %email.subject,
            body = %email.body,
            "Outbound email"
        );
        Ok(())
    }
}
