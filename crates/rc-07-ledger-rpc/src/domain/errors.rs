//! # Domain Errors

use rc_01_chain_resolver::ResolverError;
use shared_types::LedgerError;
use thiserror::Error;

/// JSON-RPC error code nodes use for reverted calls.
pub const EXECUTION_REVERTED_CODE: i64 = 3;

/// Ledger RPC error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    /// The HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The node could not be reached.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC Error {code}: {message}")]
    JsonRpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message.
        message: String,
    },

    /// The node answered with something unexpected.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The address book could not be loaded.
    #[error("Invalid address book: {0}")]
    AddressBook(String),
}

impl RpcError {
    /// Returns true if the node reported a reverted call.
    pub fn is_revert(&self) -> bool {
        match self {
            RpcError::JsonRpc { code, message } => {
                *code == EXECUTION_REVERTED_CODE || message.to_ascii_lowercase().contains("revert")
            }
            _ => false,
        }
    }
}

impl From<RpcError> for LedgerError {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::JsonRpc { ref message, .. } if err.is_revert() => {
                LedgerError::Reverted(message.clone())
            }
            RpcError::Parse(message) => LedgerError::Decode(message),
            other => LedgerError::Rpc(other.to_string()),
        }
    }
}

impl From<RpcError> for ResolverError {
    fn from(err: RpcError) -> Self {
        ResolverError::ChainIdQuery(err.to_string())
    }
}
