//! # Outbound Ports

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::{ContentError, PinResult};
use crate::hashing::hash_json_stable;

/// Content-addressed document storage - outbound port.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetches the JSON document stored under `cid`.
    async fn fetch_json(&self, cid: &str) -> Result<Value, ContentError>;

    /// Pins `data` under a display `name` and returns its content id.
    async fn pin_json(&self, name: &str, data: &Value) -> Result<PinResult, ContentError>;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

/// In-memory content store for testing.
///
/// Content ids are derived from the stable digest, so pinning the same
/// document twice yields the same id.
#[derive(Debug, Default)]
pub struct MockContentStore {
    documents: Mutex<HashMap<String, Value>>,
    /// Should return errors?
    pub should_fail: bool,
}

impl MockContentStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    /// Number of pinned documents.
    pub fn len(&self) -> usize {
        self.documents.lock().len()
    }

    /// Returns true if nothing is pinned.
    pub fn is_empty(&self) -> bool {
        self.documents.lock().is_empty()
    }
}

#[async_trait]
impl ContentStore for MockContentStore {
    async fn fetch_json(&self, cid: &str) -> Result<Value, ContentError> {
        if cid.is_empty() {
            return Err(ContentError::EmptyCid);
        }
        if self.should_fail {
            return Err(ContentError::AllGatewaysFailed("Mock failure".to_string()));
        }
        self.documents
            .lock()
            .get(cid)
            .cloned()
            .ok_or_else(|| ContentError::AllGatewaysFailed(format!("404 Not Found: {cid}")))
    }

    async fn pin_json(&self, _name: &str, data: &Value) -> Result<PinResult, ContentError> {
        if self.should_fail {
            return Err(ContentError::Pin {
                status: 500,
                body: "Mock failure".to_string(),
            });
        }
        let digest = hash_json_stable(data).to_hex();
        let cid = format!("bafymock{}", &digest[2..18]);
        self.documents.lock().insert(cid.clone(), data.clone());
        Ok(PinResult {
            ipfs_hash: cid,
            pin_size: Some(data.to_string().len() as u64),
            timestamp: None,
        })
    }
}
