//! # Client Errors
//!
//! One enum at the composition root; every subsystem error converts into it
//! unchanged so callers still see the subsystem's own message.

use rc_01_chain_resolver::ResolverError;
use rc_02_session_bootstrap::BootstrapError;
use rc_03_decrypt_pipeline::DecryptError;
use rc_05_write_facade::WriteError;
use rc_06_continuity_store::ContinuityError;
use rc_07_ledger_rpc::RpcError;
use rc_08_content_store::ContentError;
use shared_types::LedgerError;
use thiserror::Error;

use crate::config::ConfigError;

/// Client error types.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Network classification failed.
    #[error(transparent)]
    Resolve(#[from] ResolverError),

    /// Session bootstrap failed.
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    /// Decryption failed.
    #[error(transparent)]
    Decrypt(#[from] DecryptError),

    /// A ledger read failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A ledger write failed.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// The continuity store failed.
    #[error(transparent)]
    Continuity(#[from] ContinuityError),

    /// Content fetch or pin failed.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// The JSON-RPC transport failed during setup.
    #[error(transparent)]
    Rpc(#[from] RpcError),
}
