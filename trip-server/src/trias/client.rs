//! TRIAS HTTP client.
//!
//! Posts `TripRequest` documents to the configured endpoint and hands the
//! response body to the extractor. One request per fetch cycle; retrying is
//! the caller's periodic timer, not this client.

use chrono::Utc;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

use super::error::TriasError;
use super::extract::extract_trips;
use super::request::build_trip_request;
use super::types::{TripRequestParams, TripSummary};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the TRIAS client.
#[derive(Debug, Clone)]
pub struct TriasConfig {
    /// Endpoint URL the TripRequest is posted to
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TriasConfig {
    /// Create a new config for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// TRIAS journey-planning API client.
#[derive(Debug, Clone)]
pub struct TriasClient {
    http: reqwest::Client,
    endpoint: String,
}

impl TriasClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TriasConfig) -> Result<Self, TriasError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
        })
    }

    /// Fetch the trip summaries for one request.
    ///
    /// Builds the request document with the current wall-clock timestamp,
    /// posts it, and extracts the normalized summaries from the response.
    pub async fn fetch_trips(
        &self,
        params: &TripRequestParams,
    ) -> Result<Vec<TripSummary>, TriasError> {
        let body = self.post_trip_request(params).await?;
        extract_trips(&body)
    }

    /// Post a TripRequest and return the raw response body.
    async fn post_trip_request(&self, params: &TripRequestParams) -> Result<String, TriasError> {
        let request_xml = build_trip_request(params, &Utc::now());
        debug!(endpoint = %self.endpoint, "posting TripRequest");

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=UTF-8")
            .header(ACCEPT, "text/xml")
            .body(request_xml)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TriasError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "received TripResponse");
        Ok(body)
    }
}
