//! Notification channel implementations.

pub mod email;
pub mod sms;

use async_trait::async_trait;

use crate::error::ChannelError;
use crate::event::TrainAlert;

/// Trait for notification channels (SMS, email, etc.).
#[async_trait]
pub trait NotifyChannel: Send + Sync {
    /// Get the name of this channel.
    fn name(&self) -> &'static str;

    /// Check if this channel is enabled/configured.
    fn enabled(&self) -> bool;

    /// Send a train alert to this channel.
    async fn send(&self, alert: &TrainAlert) -> Result<(), ChannelError>;
}
