//! # Content Store Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default read gateways, tried in order.
pub const DEFAULT_GATEWAYS: [&str; 3] = [
    "https://cloudflare-ipfs.com",
    "https://ipfs.io",
    "https://gateway.pinata.cloud",
];

/// Default JSON pinning endpoint.
pub const DEFAULT_PIN_ENDPOINT: &str = "https://api.pinata.cloud/pinning/pinJSONToIPFS";

/// Content store configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStoreConfig {
    /// Gateway base URLs; documents are read from `{base}/ipfs/{cid}`.
    #[serde(default = "default_gateways")]
    pub gateways: Vec<String>,

    /// JSON pinning endpoint.
    #[serde(default = "default_pin_endpoint")]
    pub pin_endpoint: String,

    /// Bearer token for the pinning service. Never serialized.
    #[serde(default, skip_serializing)]
    pub pinata_jwt: Option<String>,

    /// Per-request timeout, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_gateways() -> Vec<String> {
    DEFAULT_GATEWAYS.iter().map(|g| g.to_string()).collect()
}

fn default_pin_endpoint() -> String {
    DEFAULT_PIN_ENDPOINT.to_string()
}

fn default_request_timeout_ms() -> u64 {
    15_000
}

impl Default for ContentStoreConfig {
    fn default() -> Self {
        Self {
            gateways: default_gateways(),
            pin_endpoint: default_pin_endpoint(),
            pinata_jwt: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl ContentStoreConfig {
    /// Create a config for testing: no gateways, no credentials.
    pub fn for_testing() -> Self {
        Self {
            gateways: Vec::new(),
            pin_endpoint: "http://127.0.0.1:1/pinning/pinJSONToIPFS".to_string(),
            pinata_jwt: None,
            request_timeout_ms: 1_000,
        }
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Parse a comma-separated gateway list, dropping blanks and trailing
    /// slashes.
    pub fn parse_gateways(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|g| g.trim().trim_end_matches('/'))
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect()
    }
}
