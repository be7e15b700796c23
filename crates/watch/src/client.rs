//! HTTP client for the SNCF TGVmax open-data API.

use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::records::{decode_records, RecordsPage, TrainRecord};

/// Base URL of the TGVmax dataset.
pub const API_BASE_URL: &str = "https://ressources.data.sncf.com/api/v2/catalog/datasets/tgvmax";

/// Request timeout so a hung connection cannot stall the poll loop.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors from an availability fetch.
///
/// Transport failures are transient: the loop logs them and retries on the
/// next cycle. Schema failures are fatal, since an upstream format change
/// would otherwise leave the watcher silently unable to ever match.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, timeout or HTTP-status failure
    #[error("availability request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body does not match the expected schema
    #[error("unexpected response shape: {0}")]
    Schema(#[from] serde_json::Error),
}

impl FetchError {
    /// Whether the loop should retry after the standard interval.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Exact-match filters for one availability query.
///
/// Station names must be the canonical strings produced by
/// [`crate::stations::StationDirectory::resolve`]; no fuzzy matching
/// happens here.
#[derive(Debug, Clone)]
pub struct TravelQuery {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
}

impl TravelQuery {
    /// Render the records URL for this query, percent-encoding all filters.
    #[must_use]
    pub fn records_url(&self, base_url: &str) -> String {
        format!(
            "{base_url}/records?order_by=date&refine=origine:{}&refine=destination:{}&refine=date:{}",
            urlencoding::encode(&self.origin),
            urlencoding::encode(&self.destination),
            urlencoding::encode(&self.date.to_string()),
        )
    }
}

/// Availability fetcher for a fixed query.
pub struct AvailabilityClient {
    client: reqwest::Client,
    url: String,
}

impl AvailabilityClient {
    /// Create a client for the production API.
    pub fn new(query: &TravelQuery) -> Result<Self, FetchError> {
        Self::with_base_url(query, API_BASE_URL)
    }

    /// Create a client against a specific base URL (used by tests).
    pub fn with_base_url(query: &TravelQuery, base_url: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            url: query.records_url(base_url),
        })
    }

    /// Fetch the current record set for the query.
    pub async fn fetch(&self) -> Result<Vec<TrainRecord>, FetchError> {
        debug!(url = %self.url, "fetching availability");

        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let page: RecordsPage = serde_json::from_str(&body)?;
        Ok(decode_records(page))
    }
}
