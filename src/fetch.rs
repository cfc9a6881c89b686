//! Page fetching over HTTP.
//!
//! The crawl consumes documents through the narrow [`PageFetcher`]
//! seam; tests substitute canned HTML for the reqwest-backed
//! implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::ScrapeError;

/// Fetches one document for an endpoint plus query parameters.
#[async_trait]
pub trait PageFetcher {
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<String, ScrapeError>;
}

/// Production fetcher over a shared reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout_seconds: u64) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ScrapeError::transport("client setup", e))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<String, ScrapeError> {
        tracing::debug!(url = endpoint, ?params, "fetching page");

        let response = self
            .client
            .get(endpoint)
            .query(params)
            .send()
            .await
            .map_err(|e| ScrapeError::transport(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::transport(
                endpoint,
                format!("HTTP status {status}"),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| ScrapeError::transport(endpoint, e))
    }
}
