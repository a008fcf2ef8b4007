//! # RC-08 Content Store
//!
//! Resume documents live off-chain in content-addressed storage; the ledger
//! only keeps their digest. This crate provides:
//!
//! - [`ContentStore`]: fetch a JSON document by content id, pin a new one
//! - [`GatewayContentStore`]: public IPFS gateways for reads (first success
//!   wins) and a Pinata-style pinning endpoint for writes
//! - [`hash_json_stable`]: the digest stored in `Record.content_hash`
//!
//! **Subsystem ID:** 08

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod hashing;
pub mod ports;

pub use adapters::GatewayContentStore;
pub use config::ContentStoreConfig;
pub use domain::{ContentError, PinResult};
pub use hashing::{hash_json_stable, stable_json};
pub use ports::{ContentStore, MockContentStore};
