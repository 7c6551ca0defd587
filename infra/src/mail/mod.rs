//! Outbound email delivery

mod log_mailer;

pub use log_mailer::LogMailer;
