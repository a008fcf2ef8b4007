//! # Adapters
//!
//! Signer implementations of the `TypedDataSigner` port.

pub mod local_signer;

pub use local_signer::{address_from_verifying_key, recover_signer, LocalSigner};
