//! HTTP adapter for the mock relayer metadata endpoint.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::domain::BootstrapError;
use crate::ports::MetadataFetcher;

/// Fetches relayer metadata over HTTP.
pub struct HttpMetadataFetcher {
    client: reqwest::Client,
}

impl HttpMetadataFetcher {
    /// Create a fetcher with a request timeout.
    pub fn new(timeout: Duration) -> Result<Self, BootstrapError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BootstrapError::CreateSession(e.to_string()))?;
        Ok(Self { client })
    }
}

/// `{endpoint}/{path}` with exactly one separating slash.
pub fn metadata_url(endpoint: &str, path: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[async_trait]
impl MetadataFetcher for HttpMetadataFetcher {
    async fn fetch(&self, endpoint: &str, path: &str) -> Option<Value> {
        let url = metadata_url(endpoint, path);
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("[rc-02] No relayer metadata at {}: {}", url, e);
                return None;
            }
        };
        if !response.status().is_success() {
            debug!("[rc-02] Relayer metadata at {} answered {}", url, response.status());
            return None;
        }
        match response.json::<Value>().await {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                debug!("[rc-02] Relayer metadata at {} is not JSON: {}", url, e);
                None
            }
        }
    }
}
