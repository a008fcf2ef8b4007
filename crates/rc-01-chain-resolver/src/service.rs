//! # Chain Resolver Service

use tracing::{debug, info};

use crate::config::ResolverConfig;
use crate::domain::{MockChainTable, NetworkResolution, ResolverError, LOCAL_CHAIN_ID};
use crate::ports::ProviderHandle;

/// Resolves a provider to a [`NetworkResolution`].
#[derive(Clone, Debug, Default)]
pub struct ChainResolver {
    table: MockChainTable,
}

impl ChainResolver {
    /// Create a resolver from configuration.
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            table: config.mock_table(),
        }
    }

    /// The effective mock table.
    pub fn table(&self) -> &MockChainTable {
        &self.table
    }

    /// Resolve a provider.
    ///
    /// A bare URL is assumed to be the local network. A live provider is
    /// asked for its chain id once; a failing query is returned as is.
    pub async fn resolve(&self, provider: &ProviderHandle) -> Result<NetworkResolution, ResolverError> {
        let (chain_id, provider_url) = match provider {
            ProviderHandle::Url(url) => (LOCAL_CHAIN_ID, Some(url.clone())),
            ProviderHandle::Rpc(source) => (source.chain_id().await?, None),
        };
        Ok(self.classify(chain_id, provider_url))
    }

    /// Classify an already known chain id.
    pub fn classify(&self, chain_id: u64, provider_url: Option<String>) -> NetworkResolution {
        let resolution = match self.table.endpoint(chain_id) {
            Some(default_endpoint) => NetworkResolution {
                is_mock: true,
                chain_id,
                endpoint_url: provider_url.or_else(|| Some(default_endpoint.to_string())),
            },
            None => NetworkResolution {
                is_mock: false,
                chain_id,
                endpoint_url: provider_url,
            },
        };

        if resolution.is_mock {
            info!(
                "[rc-01] Chain {} is a mock network at {:?}",
                chain_id, resolution.endpoint_url
            );
        } else {
            debug!("[rc-01] Chain {} is a production network", chain_id);
        }
        resolution
    }
}
