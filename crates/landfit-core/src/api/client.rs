//! HTTP client for the country area source page.
//!
//! Each call to [`SourceClient::fetch_table`] issues exactly one GET request.
//! Nothing is retried: a failed fetch is reported to the caller as is.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::CountryAreaTable;

use super::{parse_table, AcquisitionError};

/// Browser-like user agent; some government sites refuse default client agents
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Client for the ranked country area page.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct SourceClient {
    client: Client,
    url: String,
}

impl SourceClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AcquisitionError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AcquisitionError> {
        Self::new(config.source_url.clone(), config.request_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, AcquisitionError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(AcquisitionError::from_status(status, &body))
        }
    }

    /// Download the source page and extract the ranked country table
    pub async fn fetch_table(&self) -> Result<CountryAreaTable, AcquisitionError> {
        info!(url = %self.url, "Fetching country areas");

        let response = self.client.get(&self.url).send().await?;
        let response = Self::check_response(response).await?;

        let html = response.text().await?;
        debug!(bytes = html.len(), "Source page received");

        let table = parse_table(&html)?;
        info!(countries = table.len(), "Country areas fetched");
        Ok(table)
    }
}
