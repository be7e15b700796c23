//! Email notification channel over SMTP.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::error::ChannelError;
use crate::event::TrainAlert;
use crate::NotifyChannel;

/// Environment variable for the SMTP username (also the default sender).
pub const ENV_SMTP_USERNAME: &str = "SMTP_USERNAME";

/// Environment variable for the SMTP password (an app password for Gmail).
pub const ENV_SMTP_PASSWORD: &str = "SMTP_PASSWORD";

/// Environment variable for the SMTP host.
pub const ENV_SMTP_HOST: &str = "SMTP_HOST";

/// Environment variable for the SMTP port.
pub const ENV_SMTP_PORT: &str = "SMTP_PORT";

/// Environment variable for the recipient address.
pub const ENV_ALERT_TO_EMAIL: &str = "ALERT_TO_EMAIL";

/// Default SMTP host (Gmail).
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default SMTP port (STARTTLS).
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// SMTP configuration for the email channel.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port.
    pub smtp_port: u16,
    /// SMTP username.
    pub smtp_username: String,
    /// SMTP password.
    pub smtp_password: String,
    /// Sender address (usually same as username).
    pub from_email: String,
    /// Recipient address.
    pub to_email: String,
}

impl EmailConfig {
    /// Read configuration from environment variables.
    ///
    /// Returns `None` unless both `SMTP_USERNAME` and `SMTP_PASSWORD` are
    /// set. The recipient defaults to the sender when `ALERT_TO_EMAIL` is
    /// absent.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let smtp_username = std::env::var(ENV_SMTP_USERNAME).ok()?;
        let smtp_password = std::env::var(ENV_SMTP_PASSWORD).ok()?;

        let smtp_host =
            std::env::var(ENV_SMTP_HOST).unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string());
        let smtp_port = std::env::var(ENV_SMTP_PORT)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SMTP_PORT);
        let to_email =
            std::env::var(ENV_ALERT_TO_EMAIL).unwrap_or_else(|_| smtp_username.clone());

        Some(Self {
            smtp_host,
            smtp_port,
            from_email: smtp_username.clone(),
            smtp_username,
            smtp_password,
            to_email,
        })
    }
}

/// Email notification channel using STARTTLS SMTP.
pub struct EmailChannel {
    config: Option<EmailConfig>,
}

impl EmailChannel {
    /// Create an email channel from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let config = EmailConfig::from_env();

        if config.is_some() {
            debug!("email notifications enabled");
        } else {
            debug!("email notifications disabled ({ENV_SMTP_USERNAME}/{ENV_SMTP_PASSWORD} not set)");
        }

        Self { config }
    }

    /// Create an email channel with explicit configuration.
    #[must_use]
    pub const fn new(config: EmailConfig) -> Self {
        Self {
            config: Some(config),
        }
    }
}

#[async_trait]
impl NotifyChannel for EmailChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    fn enabled(&self) -> bool {
        self.config.is_some()
    }

    async fn send(&self, alert: &TrainAlert) -> Result<(), ChannelError> {
        let Some(config) = &self.config else {
            return Err(ChannelError::NotConfigured(
                format!("{ENV_SMTP_USERNAME}/{ENV_SMTP_PASSWORD} not set"),
            ));
        };

        let from: Mailbox = config.from_email.parse()?;
        let to: Mailbox = config.to_email.parse()?;

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(alert.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(alert.message())?;

        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        );

        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(credentials)
                .build();

        debug!(to = %config.to_email, train_no = %alert.train_no, "sending email alert");
        mailer.send(email).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EmailConfig {
        EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_username: "watch@example.com".to_string(),
            smtp_password: "app-password".to_string(),
            from_email: "watch@example.com".to_string(),
            to_email: "me@example.com".to_string(),
        }
    }

    fn alert() -> TrainAlert {
        TrainAlert {
            date: "2026-09-18".to_string(),
            train_no: "6613".to_string(),
            origin: "PARIS (intramuros)".to_string(),
            destination: "LYON (intramuros)".to_string(),
            origin_code: None,
            destination_code: None,
            departure: "11:58".to_string(),
            arrival: "13:56".to_string(),
        }
    }

    #[test]
    fn channel_with_config_is_enabled() {
        assert!(EmailChannel::new(config()).enabled());
        assert!(!EmailChannel { config: None }.enabled());
    }

    #[tokio::test]
    async fn unconfigured_channel_refuses_to_send() {
        let channel = EmailChannel { config: None };
        let err = channel.send(&alert()).await.unwrap_err();
        assert!(matches!(err, ChannelError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn bad_recipient_address_is_an_error() {
        let mut config = config();
        config.to_email = "not-an-address".to_string();
        let channel = EmailChannel::new(config);
        let err = channel.send(&alert()).await.unwrap_err();
        assert!(matches!(err, ChannelError::Address(_)));
    }
}
