//! # Domain Entities

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Chain id of the local development network.
pub const LOCAL_CHAIN_ID: u64 = 31337;

/// Default RPC endpoint of the local development network.
pub const LOCAL_ENDPOINT: &str = "http://localhost:8545";

/// Outcome of resolving a provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkResolution {
    /// True for local/test networks served by the mock relayer path.
    pub is_mock: bool,
    /// Network id.
    pub chain_id: u64,
    /// Endpoint to reach the network, when known.
    pub endpoint_url: Option<String>,
}

/// Chain ids treated as mock networks, with their default endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockChainTable {
    entries: BTreeMap<u64, String>,
}

impl Default for MockChainTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MockChainTable {
    /// The built-in table: the local development network only.
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(LOCAL_CHAIN_ID, LOCAL_ENDPOINT.to_string());
        Self { entries }
    }

    /// Built-in table merged with `overrides`; overrides win on conflict.
    pub fn with_overrides(overrides: &BTreeMap<u64, String>) -> Self {
        let mut table = Self::builtin();
        for (chain_id, endpoint) in overrides {
            table.entries.insert(*chain_id, endpoint.clone());
        }
        table
    }

    /// Default endpoint of a mock chain, or None for production chains.
    pub fn endpoint(&self, chain_id: u64) -> Option<&str> {
        self.entries.get(&chain_id).map(String::as_str)
    }

    /// Returns true if `chain_id` is a mock network.
    pub fn contains(&self, chain_id: u64) -> bool {
        self.entries.contains_key(&chain_id)
    }

    /// All mock chain ids, ascending.
    pub fn chain_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.keys().copied()
    }
}
