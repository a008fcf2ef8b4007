//! # Outbound Ports

use async_trait::async_trait;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::domain::ResolverError;

/// A live provider that can be asked for its chain id - outbound port.
#[async_trait]
pub trait ChainIdSource: Send + Sync {
    /// One `eth_chainId` round trip.
    async fn chain_id(&self) -> Result<u64, ResolverError>;

    /// Identifier for logging.
    fn describe(&self) -> String;
}

/// What the caller hands the resolver.
#[derive(Clone)]
pub enum ProviderHandle {
    /// A bare RPC URL; assumed to be the local network.
    Url(String),
    /// A live provider queried for its chain id.
    Rpc(Arc<dyn ChainIdSource>),
}

impl fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderHandle::Url(url) => f.debug_tuple("Url").field(url).finish(),
            ProviderHandle::Rpc(source) => f.debug_tuple("Rpc").field(&source.describe()).finish(),
        }
    }
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

/// Mock chain id source for testing.
#[derive(Debug, Default)]
pub struct MockChainIdSource {
    /// Chain id to report.
    pub chain_id: u64,
    /// Should return errors?
    pub should_fail: bool,
    calls: AtomicUsize,
}

impl MockChainIdSource {
    /// A source reporting `chain_id`.
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            should_fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A source whose query always fails.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    /// Number of queries made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainIdSource for MockChainIdSource {
    async fn chain_id(&self) -> Result<u64, ResolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(ResolverError::ChainIdQuery("Mock failure".to_string()));
        }
        Ok(self.chain_id)
    }

    fn describe(&self) -> String {
        format!("mock-chain-{}", self.chain_id)
    }
}
