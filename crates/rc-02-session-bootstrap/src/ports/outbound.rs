//! # Outbound Ports
//!
//! The relayer SDK is an external collaborator. These traits state exactly
//! what the bootstrapper needs from it.

use async_trait::async_trait;
use serde_json::{json, Value};
use shared_types::{MockSession, Session, SessionDescriptor, SessionKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{BootstrapError, CapabilitySet, SdkInitOptions};

/// A loaded relayer SDK.
#[async_trait]
pub trait RelayerSdk: Send + Sync {
    /// Operations this SDK offers.
    fn capabilities(&self) -> CapabilitySet;

    /// Runs the SDK init routine. `Ok(false)` means init did not succeed.
    async fn init(&self, options: &SdkInitOptions) -> Result<bool, BootstrapError>;

    /// Default network configuration for instance construction.
    fn default_config(&self) -> Result<Value, BootstrapError>;

    /// Builds a session from a network configuration.
    async fn create_instance(&self, config: Value) -> Result<Arc<dyn Session>, BootstrapError>;
}

/// Fetches the relayer SDK.
#[async_trait]
pub trait SdkLoader: Send + Sync {
    /// Loads the SDK. Called at most once per registry.
    async fn load(&self) -> Result<Arc<dyn RelayerSdk>, BootstrapError>;
}

/// Reads relayer metadata advertised by a local development node.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// `GET {endpoint}/{path}`. Any failure or non-JSON answer is `None`.
    async fn fetch(&self, endpoint: &str, path: &str) -> Option<Value>;
}

/// Builds metadata-driven sessions for mock networks.
#[async_trait]
pub trait MockSessionFactory: Send + Sync {
    /// Create a session for a mock network from its relayer metadata.
    async fn create(
        &self,
        endpoint: &str,
        chain_id: u64,
        metadata: Value,
    ) -> Result<Arc<dyn Session>, BootstrapError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Relayer SDK double.
#[derive(Debug)]
pub struct MockRelayerSdk {
    /// Advertised capabilities.
    pub capabilities: CapabilitySet,
    /// Result of `init`.
    pub init_result: bool,
    /// Chain id written into the default config.
    pub chain_id: u64,
    /// Artificial latency of `init`.
    pub init_delay: Duration,
    /// Artificial latency of `create_instance`.
    pub create_delay: Duration,
    init_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

impl MockRelayerSdk {
    /// A well-formed SDK whose default config targets `chain_id`.
    pub fn new(chain_id: u64) -> Self {
        Self {
            capabilities: CapabilitySet::full(),
            init_result: true,
            chain_id,
            init_delay: Duration::ZERO,
            create_delay: Duration::ZERO,
            init_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `init` calls.
    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    /// Number of `create_instance` calls.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RelayerSdk for MockRelayerSdk {
    fn capabilities(&self) -> CapabilitySet {
        self.capabilities.clone()
    }

    async fn init(&self, _options: &SdkInitOptions) -> Result<bool, BootstrapError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if !self.init_delay.is_zero() {
            tokio::time::sleep(self.init_delay).await;
        }
        Ok(self.init_result)
    }

    fn default_config(&self) -> Result<Value, BootstrapError> {
        Ok(json!({
            "chainId": self.chain_id,
            "relayerUrl": "https://relayer.mock",
        }))
    }

    async fn create_instance(&self, config: Value) -> Result<Arc<dyn Session>, BootstrapError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if !self.create_delay.is_zero() {
            tokio::time::sleep(self.create_delay).await;
        }
        let chain_id = config
            .get("chainId")
            .and_then(Value::as_u64)
            .ok_or_else(|| BootstrapError::CreateSession("config without chainId".into()))?;
        let endpoint = config
            .get("relayerUrl")
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(Arc::new(MockSession::new(SessionDescriptor {
            kind: SessionKind::Relayer,
            chain_id,
            endpoint,
        })))
    }
}

/// SDK loader double.
pub struct MockSdkLoader {
    sdk: Option<Arc<MockRelayerSdk>>,
    /// Artificial latency of `load`.
    pub delay: Duration,
    loads: AtomicUsize,
}

impl MockSdkLoader {
    /// A loader that yields `sdk`.
    pub fn new(sdk: Arc<MockRelayerSdk>) -> Self {
        Self {
            sdk: Some(sdk),
            delay: Duration::ZERO,
            loads: AtomicUsize::new(0),
        }
    }

    /// A loader whose fetch fails.
    pub fn failing() -> Self {
        Self {
            sdk: None,
            delay: Duration::ZERO,
            loads: AtomicUsize::new(0),
        }
    }

    /// Builder: add latency to `load`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of `load` calls.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SdkLoader for MockSdkLoader {
    async fn load(&self) -> Result<Arc<dyn RelayerSdk>, BootstrapError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.sdk {
            Some(sdk) => Ok(sdk.clone()),
            None => Err(BootstrapError::SdkLoad("script failed to load".to_string())),
        }
    }
}

/// Metadata endpoint double.
#[derive(Debug, Default)]
pub struct MockMetadataFetcher {
    /// Metadata to return; `None` simulates a 404.
    pub metadata: Option<Value>,
    requests: parking_lot::Mutex<Vec<String>>,
}

impl MockMetadataFetcher {
    /// A fetcher that answers with `metadata`.
    pub fn with_metadata(metadata: Value) -> Self {
        Self {
            metadata: Some(metadata),
            requests: parking_lot::Mutex::new(Vec::new()),
        }
    }

    /// URLs requested so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl MetadataFetcher for MockMetadataFetcher {
    async fn fetch(&self, endpoint: &str, path: &str) -> Option<Value> {
        self.requests
            .lock()
            .push(format!("{}/{}", endpoint.trim_end_matches('/'), path));
        self.metadata.clone()
    }
}

/// Mock-network session factory double.
#[derive(Debug, Default)]
pub struct StubSessionFactory {
    created: AtomicUsize,
}

impl StubSessionFactory {
    /// Number of sessions created.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MockSessionFactory for StubSessionFactory {
    async fn create(
        &self,
        endpoint: &str,
        chain_id: u64,
        _metadata: Value,
    ) -> Result<Arc<dyn Session>, BootstrapError> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockSession::new(SessionDescriptor {
            kind: SessionKind::Mock,
            chain_id,
            endpoint: Some(endpoint.to_string()),
        })))
    }
}
