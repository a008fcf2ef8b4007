//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors produced when parsing string-encoded primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input was empty.
    #[error("empty input")]
    Empty,

    /// Input is not valid hexadecimal.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Input is not a valid decimal integer.
    #[error("invalid integer: {0}")]
    InvalidInteger(String),

    /// Fixed-width value had the wrong number of hex digits.
    #[error("expected {expected_bytes} bytes, got {hex_digits} hex digits")]
    InvalidLength {
        /// Expected width in bytes.
        expected_bytes: usize,
        /// Hex digits actually supplied.
        hex_digits: usize,
    },

    /// Value does not fit in 256 bits.
    #[error("value exceeds 256 bits: {0}")]
    Overflow(String),
}

/// Errors surfaced by ledger adapters.
///
/// `Rpc` is the connectivity class: it is surfaced verbatim and never
/// retried by the subsystems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Transport or JSON-RPC failure.
    #[error("Ledger RPC error: {0}")]
    Rpc(String),

    /// The contract call reverted.
    #[error("Ledger call reverted: {0}")]
    Reverted(String),

    /// The requested record does not exist.
    #[error("Record {0} not found")]
    NotFound(u64),

    /// The ledger returned data that could not be decoded.
    #[error("Malformed ledger response: {0}")]
    Decode(String),

    /// The transaction was mined but reverted.
    #[error("Transaction {tx_hash} failed on-chain")]
    TransactionFailed {
        /// Hash of the failed transaction.
        tx_hash: String,
    },

    /// No receipt appeared within the confirmation timeout.
    #[error("Timed out waiting for receipt of {tx_hash}")]
    ReceiptTimeout {
        /// Hash of the pending transaction.
        tx_hash: String,
    },
}

/// Errors surfaced by an encryption session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session could not produce a keypair.
    #[error("Keypair generation failed: {0}")]
    Keypair(String),

    /// The authorization payload could not be built.
    #[error("Authorization payload rejected: {0}")]
    Authorization(String),

    /// The relayer refused or failed the decrypt request.
    #[error("Relayer decrypt failed: {0}")]
    Decrypt(String),
}

/// Errors surfaced by a wallet signer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
    /// The user (or wallet) refused to sign.
    #[error("Signature rejected: {0}")]
    Rejected(String),

    /// The signer is not reachable.
    #[error("Signer unavailable: {0}")]
    Unavailable(String),
}
