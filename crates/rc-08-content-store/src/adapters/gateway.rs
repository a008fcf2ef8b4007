//! HTTP gateway reads and Pinata-style pinning.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::ContentStoreConfig;
use crate::domain::{ContentError, PinResult};
use crate::ports::ContentStore;

/// Name used when pinning without one.
pub const DEFAULT_PIN_NAME: &str = "resume.json";

/// Content store backed by public IPFS gateways and a pinning service.
pub struct GatewayContentStore {
    client: Client,
    gateways: Vec<String>,
    pin_endpoint: String,
    jwt: Option<String>,
}

impl GatewayContentStore {
    /// Create a store from `config`.
    pub fn new(config: &ContentStoreConfig) -> Result<Self, ContentError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ContentError::Http(e.to_string()))?;
        Ok(Self {
            client,
            gateways: config.gateways.clone(),
            pin_endpoint: config.pin_endpoint.clone(),
            jwt: config.pinata_jwt.clone().filter(|jwt| !jwt.is_empty()),
        })
    }

    /// Read URL of `cid` on gateway `base`.
    pub fn gateway_url(base: &str, cid: &str) -> String {
        format!("{}/ipfs/{}", base.trim_end_matches('/'), cid)
    }

    /// Returns true if pinning credentials are configured.
    pub fn can_pin(&self) -> bool {
        self.jwt.is_some()
    }

    async fn fetch_from(&self, url: &str) -> Result<Value, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            ));
        }
        response.json::<Value>().await.map_err(|e| e.to_string())
    }
}

#[async_trait]
impl ContentStore for GatewayContentStore {
    async fn fetch_json(&self, cid: &str) -> Result<Value, ContentError> {
        let cid = cid.trim();
        if cid.is_empty() {
            return Err(ContentError::EmptyCid);
        }

        let mut last_err = "no gateways configured".to_string();
        for base in &self.gateways {
            let url = Self::gateway_url(base, cid);
            match self.fetch_from(&url).await {
                Ok(value) => {
                    debug!("[rc-08] Fetched {} from {}", cid, base);
                    return Ok(value);
                }
                Err(e) => {
                    warn!("[rc-08] Gateway {} failed for {}: {}", base, cid, e);
                    last_err = e;
                }
            }
        }
        Err(ContentError::AllGatewaysFailed(last_err))
    }

    async fn pin_json(&self, name: &str, data: &Value) -> Result<PinResult, ContentError> {
        let jwt = self
            .jwt
            .as_deref()
            .ok_or_else(|| ContentError::NotConfigured("PINATA_JWT".to_string()))?;
        let name = if name.is_empty() { DEFAULT_PIN_NAME } else { name };

        let body = json!({
            "pinataMetadata": { "name": name },
            "pinataContent": data,
        });
        let response = self
            .client
            .post(&self.pin_endpoint)
            .bearer_auth(jwt)
            .json(&body)
            .send()
            .await
            .map_err(|e| ContentError::Http(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ContentError::Http(e.to_string()))?;
        if !status.is_success() {
            return Err(ContentError::Pin {
                status: status.as_u16(),
                body: text,
            });
        }

        let pinned: PinResult =
            serde_json::from_str(&text).map_err(|e| ContentError::Parse(e.to_string()))?;
        info!("[rc-08] Pinned {} as {}", name, pinned.ipfs_hash);
        Ok(pinned)
    }
}
