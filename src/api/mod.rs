//! HTTP fetchers for the external services.
//!
//! Every public fetcher returns a display-ready `String`. Failures are
//! logged and collapsed into a fixed sentence per fetcher, so callers never
//! see an error.

pub mod explorer;
pub mod gemini;
pub mod price;

use crate::config::{Config, Endpoints};
use crate::error::{FetchError, FetchResult};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Shared client for the price feed, the block explorer and Gemini
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    endpoints: Endpoints,
    model: String,
    gemini_api_key: Option<String>,
    etherscan_api_key: Option<String>,
}

impl ApiClient {
    // No request timeout: a lookup runs until the service answers or the
    // connection fails.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("finbot/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoints: config.endpoints.clone(),
            model: config.model.clone(),
            gemini_api_key: config.gemini_api_key.clone(),
            etherscan_api_key: config.etherscan_api_key.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a request and read the body, treating non-2xx as a failure
    async fn send(
        &self,
        service: &'static str,
        request: reqwest::RequestBuilder,
    ) -> FetchResult<String> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { service, status });
        }
        Ok(response.text().await?)
    }
}

/// Decode a JSON body, tagging failures with the service name
fn decode<T: DeserializeOwned>(service: &'static str, body: &str) -> FetchResult<T> {
    serde_json::from_str(body).map_err(|source| FetchError::Decode { service, source })
}
