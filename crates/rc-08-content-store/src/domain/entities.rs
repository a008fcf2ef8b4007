//! # Domain Entities

use serde::{Deserialize, Serialize};

/// Pinning service answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinResult {
    /// Content id of the pinned document.
    #[serde(rename = "IpfsHash")]
    pub ipfs_hash: String,
    /// Pinned size in bytes.
    #[serde(rename = "PinSize", default, skip_serializing_if = "Option::is_none")]
    pub pin_size: Option<u64>,
    /// Pin time as reported by the service.
    #[serde(rename = "Timestamp", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}
