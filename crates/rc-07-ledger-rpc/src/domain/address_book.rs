//! # Deployment Address Book
//!
//! Where the ResumeChain contract lives on each network. The JSON form is the
//! one produced from the deployment artifacts:
//!
//! ```json
//! { "11155111": { "chainId": 11155111, "chainName": "sepolia", "address": "0x…" } }
//! ```
//!
//! Entries are keyed by chain id, or by network name when the deployment did
//! not record one.

use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::BTreeMap;
use std::path::Path;

use super::errors::RpcError;

/// Chain id of Sepolia.
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

/// One contract deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Network id, when the deployment recorded it.
    #[serde(default)]
    pub chain_id: Option<u64>,
    /// Network name (deployment directory).
    #[serde(default)]
    pub chain_name: String,
    /// Contract address; zero means not deployed.
    pub address: Address,
}

/// Chain id → contract address lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressBook {
    entries: BTreeMap<String, Deployment>,
    overrides: BTreeMap<u64, Address>,
}

impl AddressBook {
    /// An empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the JSON form.
    pub fn from_json(raw: &str) -> Result<Self, RpcError> {
        let entries: BTreeMap<String, Deployment> =
            serde_json::from_str(raw).map_err(|e| RpcError::AddressBook(e.to_string()))?;
        Ok(Self {
            entries,
            overrides: BTreeMap::new(),
        })
    }

    /// Reads and parses the JSON form from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RpcError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| RpcError::AddressBook(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    /// Adds a deployment under `key`.
    pub fn insert(&mut self, key: impl Into<String>, deployment: Deployment) {
        self.entries.insert(key.into(), deployment);
    }

    /// Adds per-chain overrides, consulted before any entry.
    pub fn with_overrides(mut self, overrides: &BTreeMap<u64, Address>) -> Self {
        self.overrides
            .extend(overrides.iter().map(|(id, addr)| (*id, *addr)));
        self
    }

    /// Contract address on `chain_id`, or None if not deployed there.
    pub fn lookup(&self, chain_id: u64) -> Option<Address> {
        let address = match self.overrides.get(&chain_id) {
            Some(address) => Some(*address),
            None => self.entry(chain_id).map(|d| d.address),
        };
        address.filter(|a| *a != Address::ZERO)
    }

    fn entry(&self, chain_id: u64) -> Option<&Deployment> {
        self.entries.get(&chain_id.to_string()).or_else(|| {
            self.entries.values().find(|d| {
                d.chain_id == Some(chain_id)
                    || (chain_id == SEPOLIA_CHAIN_ID && d.chain_name.eq_ignore_ascii_case("sepolia"))
            })
        })
    }

    /// Returns true if nothing is known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.overrides.is_empty()
    }
}
