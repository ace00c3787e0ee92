//! Filter backend
//!
//! The backend screens its own stock list and answers with the tickers
//! that matched. The dashboard only ever calls one endpoint on it.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::time::Duration;
use url::Url;

use crate::error::FilterError;
use crate::filter::{FilterType, ResultSet};
use crate::Result;

/// Endpoint path, relative to the configured base URL
pub const FILTER_PATH: &str = "api/filter";

#[async_trait]
pub trait FilterBackend: Send + Sync {
    /// Fetch the stocks matching `filter`, in the order the backend sent them
    async fn fetch(&self, filter: &FilterType) -> Result<ResultSet>;
}

#[derive(Debug, Clone)]
pub struct HttpFilterBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpFilterBackend {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::limited(5))
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Self::with_client(client, base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url.trim()).map_err(|e| FilterError::InvalidUrl(e.to_string()))?;

        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(FilterError::InvalidUrl(format!(
                "unsupported scheme: {}",
                base_url.scheme()
            )));
        }

        // Keep any path prefix when joining the endpoint
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full request URL for `filter`, with the name query-encoded
    pub fn endpoint(&self, filter: &FilterType) -> Result<Url> {
        let mut url = self
            .base_url
            .join(FILTER_PATH)
            .map_err(|e| FilterError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair("type", filter.as_str());
        Ok(url)
    }
}

#[async_trait]
impl FilterBackend for HttpFilterBackend {
    async fn fetch(&self, filter: &FilterType) -> Result<ResultSet> {
        let url = self.endpoint(filter)?;
        tracing::debug!(filter = %filter, url = %url, "Requesting filter results");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FilterError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;

        Ok(serde_json::from_slice(&body)?)
    }
}
