//! # RC-03 Decrypt Pipeline
//!
//! Resolves encrypted handles to cleartext values for the connected account.
//!
//! **Subsystem ID:** 03
//!
//! ## Protocol
//!
//! 1. Drop null handles (all zero) and unparseable strings.
//! 2. Ask the session for a fresh one-time keypair.
//! 3. Build a `UserDecryptRequestVerification` payload scoped to the
//!    contract, valid from now for `duration_days`.
//! 4. Have the wallet sign it (EIP-712).
//! 5. Submit one batched request to the session.
//! 6. Normalize whatever shape the backend answers with into a map keyed by
//!    the caller's original handle strings.
//!
//! A missing session or signer is not an error: the call returns an empty
//! map, so callers may invoke it before a wallet is connected.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod eip712;
pub mod service;

pub use adapters::LocalSigner;
pub use config::DecryptConfig;
pub use domain::{ClearValue, DecryptError, DecryptResponse, DecryptedValues, RequestedHandle};
pub use service::DecryptPipeline;
