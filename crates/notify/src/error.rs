//! Error types for the notification system.

use thiserror::Error;

/// Errors that can occur when sending notifications.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// SMS gateway rejected the message
    #[error("SMS gateway rejected the message: HTTP {0}")]
    Gateway(u16),

    /// SMTP transport failed
    #[error("SMTP transport failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Email message could not be built
    #[error("invalid email message: {0}")]
    Message(#[from] lettre::error::Error),

    /// Email address could not be parsed
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// Channel is not configured
    #[error("channel not configured: {0}")]
    NotConfigured(String),
}
