//! # Adapters
//!
//! Stand-in relayer backend for deployments that ship no relayer SDK.

use async_trait::async_trait;
use rc_02_session_bootstrap::{BootstrapError, MockSessionFactory, RelayerSdk, SdkLoader};
use serde_json::Value;
use shared_types::Session;
use std::sync::Arc;

/// Relayer backend that is never available.
///
/// Ledger reads, writes and content access keep working; session bootstrap
/// fails with a load or create error and decrypts stay empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableRelayer;

#[async_trait]
impl SdkLoader for UnavailableRelayer {
    async fn load(&self) -> Result<Arc<dyn RelayerSdk>, BootstrapError> {
        Err(BootstrapError::SdkLoad("no relayer SDK is bundled".to_string()))
    }
}

#[async_trait]
impl MockSessionFactory for UnavailableRelayer {
    async fn create(
        &self,
        endpoint: &str,
        chain_id: u64,
        _metadata: Value,
    ) -> Result<Arc<dyn Session>, BootstrapError> {
        Err(BootstrapError::CreateSession(format!(
            "no mock relayer backend for chain {chain_id} at {endpoint}"
        )))
    }
}
