//! # Domain Types

use serde::{Deserialize, Serialize};
use shared_types::{Bytes32, LedgerError};
use thiserror::Error;

/// Result of a confirmed `createResume`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOutcome {
    /// Transaction hash.
    pub tx_hash: Bytes32,
    /// Id from the `ResumeCreated` event; None if the receipt lacked it.
    pub resume_id: Option<u64>,
}

/// Write façade error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    /// No signer, or no deployment on the current network.
    #[error("wallet not connected / network not supported")]
    NotConnected,

    /// The ledger rejected or failed the transaction.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
