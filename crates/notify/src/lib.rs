//! Notification channels for TGVmax availability alerts.
//!
//! This crate delivers a [`TrainAlert`] over the configured channels when
//! the watcher finds a discounted seat. Delivery is best-effort: failures
//! are logged and swallowed so a transient SMS or SMTP outage never kills
//! the polling loop.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use notify::{Notifier, NotifyChannel, SmsChannel};
//!
//! # async fn run(alert: notify::TrainAlert) {
//! let channels: Vec<Arc<dyn NotifyChannel>> = vec![Arc::new(SmsChannel::from_env())];
//! let notifier = Notifier::with_channels(channels);
//! notifier.dispatch(&alert).await;
//! # }
//! ```
//!
//! # Architecture
//!
//! Channels implement the [`NotifyChannel`] trait; [`Notifier`] dispatches
//! an alert to every enabled channel:
//!
//! - [`SmsChannel`] sends through the Free Mobile SMS gateway
//! - [`EmailChannel`] sends over STARTTLS SMTP

pub mod channels;
pub mod error;
pub mod event;

pub use channels::email::{EmailChannel, EmailConfig};
pub use channels::sms::{SmsChannel, SmsCredentials};
pub use channels::NotifyChannel;
pub use error::ChannelError;
pub use event::TrainAlert;

use std::sync::Arc;
use tracing::{debug, error};

/// Central notification dispatcher.
///
/// Holds the configured channels and sends each alert to all of them,
/// counting successful deliveries. Channel failures are logged, never
/// propagated.
pub struct Notifier {
    channels: Vec<Arc<dyn NotifyChannel>>,
}

impl Notifier {
    /// Create a notifier with specific channels.
    #[must_use]
    pub fn with_channels(channels: Vec<Arc<dyn NotifyChannel>>) -> Self {
        Self { channels }
    }

    /// Create a notifier with no channels (console-only operation).
    #[must_use]
    pub const fn disabled() -> Self {
        Self { channels: vec![] }
    }

    /// Check if any notification channels are configured.
    #[must_use]
    pub fn has_channels(&self) -> bool {
        !self.channels.is_empty()
    }

    /// Get the number of configured channels.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Send an alert to every enabled channel.
    ///
    /// Returns the number of channels that accepted the message.
    pub async fn dispatch(&self, alert: &TrainAlert) -> usize {
        if self.channels.is_empty() {
            debug!("no notification channels configured, console only");
            return 0;
        }

        let mut delivered = 0;

        for channel in &self.channels {
            let channel_name = channel.name();

            if !channel.enabled() {
                debug!(channel = channel_name, "channel disabled, skipping");
                continue;
            }

            match channel.send(alert).await {
                Ok(()) => {
                    debug!(channel = channel_name, "notification sent");
                    delivered += 1;
                }
                Err(e) => {
                    error!(
                        channel = channel_name,
                        error = %e,
                        "failed to send notification"
                    );
                }
            }
        }

        delivered
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::disabled()
    }
}
