//! Free Mobile SMS gateway notification channel.

use async_trait::async_trait;
use tracing::debug;

use crate::error::ChannelError;
use crate::event::TrainAlert;
use crate::NotifyChannel;

/// Environment variable for the Free Mobile account identifier.
pub const ENV_SMS_USER: &str = "FREE_MOBILE_USER";

/// Environment variable for the Free Mobile API password.
pub const ENV_SMS_PASS: &str = "FREE_MOBILE_PASS";

/// Send endpoint of the Free Mobile SMS gateway.
const GATEWAY_URL: &str = "https://smsapi.free-mobile.fr/sendmsg";

/// Credentials for the Free Mobile SMS gateway.
#[derive(Debug, Clone)]
pub struct SmsCredentials {
    /// Free Mobile account identifier.
    pub user: String,
    /// API password generated in the subscriber area.
    pub password: String,
}

/// SMS notification channel backed by the Free Mobile gateway.
pub struct SmsChannel {
    credentials: Option<SmsCredentials>,
    gateway_url: String,
    client: reqwest::Client,
}

impl SmsChannel {
    /// Create an SMS channel from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let credentials = match (std::env::var(ENV_SMS_USER), std::env::var(ENV_SMS_PASS)) {
            (Ok(user), Ok(password)) => Some(SmsCredentials { user, password }),
            _ => None,
        };

        if credentials.is_some() {
            debug!("SMS notifications enabled");
        } else {
            debug!("SMS notifications disabled ({ENV_SMS_USER}/{ENV_SMS_PASS} not set)");
        }

        Self::build(credentials)
    }

    /// Create an SMS channel with explicit credentials.
    #[must_use]
    pub fn new(credentials: SmsCredentials) -> Self {
        Self::build(Some(credentials))
    }

    /// Point the channel at a different gateway (used by tests).
    #[must_use]
    pub fn with_gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = url.into();
        self
    }

    fn build(credentials: Option<SmsCredentials>) -> Self {
        Self {
            credentials,
            gateway_url: GATEWAY_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NotifyChannel for SmsChannel {
    fn name(&self) -> &'static str {
        "sms"
    }

    fn enabled(&self) -> bool {
        self.credentials.is_some()
    }

    async fn send(&self, alert: &TrainAlert) -> Result<(), ChannelError> {
        let Some(credentials) = &self.credentials else {
            return Err(ChannelError::NotConfigured(
                format!("{ENV_SMS_USER}/{ENV_SMS_PASS} not set"),
            ));
        };

        debug!(train_no = %alert.train_no, "sending SMS alert");

        let response = self
            .client
            .get(&self.gateway_url)
            .query(&[
                ("user", credentials.user.as_str()),
                ("pass", credentials.password.as_str()),
                ("msg", alert.message().as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChannelError::Gateway(status.as_u16()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> SmsCredentials {
        SmsCredentials {
            user: "12345678".to_string(),
            password: "s3cret".to_string(),
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
    fn channel_without_credentials_is_disabled() {
        let channel = SmsChannel::build(None);
        assert!(!channel.enabled());
    }

    #[tokio::test]
    async fn send_passes_credentials_and_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("user", "12345678"))
            .and(query_param("pass", "s3cret"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let channel = SmsChannel::new(credentials()).with_gateway_url(server.uri());
        channel.send(&alert()).await.unwrap();
    }

    #[tokio::test]
    async fn gateway_rejection_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(402))
            .mount(&server)
            .await;

        let channel = SmsChannel::new(credentials()).with_gateway_url(server.uri());
        let err = channel.send(&alert()).await.unwrap_err();
        assert!(matches!(err, ChannelError::Gateway(402)));
    }

    #[tokio::test]
    async fn unconfigured_channel_refuses_to_send() {
        let channel = SmsChannel::build(None);
        let err = channel.send(&alert()).await.unwrap_err();
        assert!(matches!(err, ChannelError::NotConfigured(_)));
    }
}
