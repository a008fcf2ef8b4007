//! JSON-RPC `eth_chainId` adapter.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::domain::ResolverError;
use crate::ports::ChainIdSource;

/// Queries a node's chain id over HTTP JSON-RPC.
pub struct HttpChainIdSource {
    client: reqwest::Client,
    url: String,
}

#[derive(Deserialize)]
struct RpcReply {
    result: Option<String>,
    error: Option<serde_json::Value>,
}

impl HttpChainIdSource {
    /// Create a source for the node at `url`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ResolverError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ResolverError::ChainIdQuery(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Node URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Parse an `eth_chainId` result (`0x`-prefixed hex quantity).
pub fn parse_chain_id_hex(raw: &str) -> Result<u64, ResolverError> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .ok_or_else(|| ResolverError::InvalidChainId(raw.to_string()))?;
    if digits.is_empty() {
        return Err(ResolverError::InvalidChainId(raw.to_string()));
    }
    u64::from_str_radix(digits, 16).map_err(|_| ResolverError::InvalidChainId(raw.to_string()))
}

#[async_trait]
impl ChainIdSource for HttpChainIdSource {
    async fn chain_id(&self) -> Result<u64, ResolverError> {
        debug!("[rc-01] eth_chainId via {}", self.url);

        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_chainId",
            "params": [],
        });

        let reply: RpcReply = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ResolverError::ChainIdQuery(e.to_string()))?
            .json()
            .await
            .map_err(|e| ResolverError::ChainIdQuery(e.to_string()))?;

        if let Some(error) = reply.error {
            return Err(ResolverError::ChainIdQuery(error.to_string()));
        }
        let result = reply
            .result
            .ok_or_else(|| ResolverError::ChainIdQuery("missing result".to_string()))?;
        parse_chain_id_hex(&result)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
