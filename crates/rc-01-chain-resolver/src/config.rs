//! # Chain Resolver Configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::MockChainTable;

/// Chain resolver configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Extra mock networks (chain id → endpoint). Merged over the built-in
    /// table, winning on conflict.
    #[serde(default)]
    pub mock_chains: BTreeMap<u64, String>,

    /// Timeout for the `eth_chainId` round trip, in milliseconds.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

fn default_query_timeout_ms() -> u64 {
    5_000
}

impl ResolverConfig {
    /// Create a config for testing: one extra mock chain, short timeout.
    pub fn for_testing() -> Self {
        let mut mock_chains = BTreeMap::new();
        mock_chains.insert(1337, "http://127.0.0.1:7545".to_string());
        Self {
            mock_chains,
            query_timeout_ms: 500,
        }
    }

    /// The effective mock table.
    pub fn mock_table(&self) -> MockChainTable {
        MockChainTable::with_overrides(&self.mock_chains)
    }

    /// Parse a `RC_MOCK_CHAINS`-style list: `id=url,id=url`.
    ///
    /// Malformed entries are skipped.
    pub fn parse_mock_chains(raw: &str) -> BTreeMap<u64, String> {
        raw.split(',')
            .filter_map(|entry| {
                let (id, url) = entry.split_once('=')?;
                let id = id.trim().parse::<u64>().ok()?;
                let url = url.trim();
                (!url.is_empty()).then(|| (id, url.to_string()))
            })
            .collect()
    }
}
