//! # Ledger RPC Configuration

use rc_01_chain_resolver::LOCAL_ENDPOINT;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::{AddressBook, RpcError};

/// Ledger RPC configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Node endpoint.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Per-request timeout, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// How long to wait for a transaction receipt, in milliseconds.
    #[serde(default = "default_receipt_timeout_ms")]
    pub receipt_timeout_ms: u64,

    /// Delay between receipt polls, in milliseconds.
    #[serde(default = "default_receipt_poll_interval_ms")]
    pub receipt_poll_interval_ms: u64,

    /// Deployment address book file (JSON), if any.
    #[serde(default)]
    pub address_book_path: Option<PathBuf>,

    /// Contract addresses that take precedence over the address book.
    #[serde(default)]
    pub contract_overrides: BTreeMap<u64, Address>,
}

fn default_rpc_url() -> String {
    LOCAL_ENDPOINT.to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_receipt_timeout_ms() -> u64 {
    120_000
}

fn default_receipt_poll_interval_ms() -> u64 {
    1_000
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            request_timeout_ms: default_request_timeout_ms(),
            receipt_timeout_ms: default_receipt_timeout_ms(),
            receipt_poll_interval_ms: default_receipt_poll_interval_ms(),
            address_book_path: None,
            contract_overrides: BTreeMap::new(),
        }
    }
}

impl RpcConfig {
    /// Create a config for testing (fast polling, short timeouts).
    pub fn for_testing() -> Self {
        Self {
            request_timeout_ms: 500,
            receipt_timeout_ms: 200,
            receipt_poll_interval_ms: 5,
            ..Default::default()
        }
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Receipt wait timeout.
    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_millis(self.receipt_timeout_ms)
    }

    /// Receipt poll interval.
    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms.max(1))
    }

    /// The effective address book: the configured file plus overrides.
    pub fn address_book(&self) -> Result<AddressBook, RpcError> {
        let book = match &self.address_book_path {
            Some(path) => AddressBook::load(path)?,
            None => AddressBook::new(),
        };
        Ok(book.with_overrides(&self.contract_overrides))
    }
}
