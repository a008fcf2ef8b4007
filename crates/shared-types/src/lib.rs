//! # Shared Types Crate
//!
//! This crate contains the value objects, ledger records, ledger events and
//! cross-subsystem ports used by the ResumeChain client.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type that crosses a subsystem crate
//!   boundary is defined here.
//! - **Ports, not adapters**: the ledger, session and signer traits live here
//!   so that scanner, write façade and decrypt pipeline share one contract;
//!   concrete adapters live in their own subsystem crates.
//! - **Strings only at the edge**: handles and addresses arrive as strings
//!   from the UI and are parsed into fixed-width types immediately.

pub mod abi;
pub mod entities;
pub mod errors;
pub mod events;
pub mod hashing;
pub mod ports;
pub mod session;

pub use entities::*;
pub use errors::*;
pub use events::{decode_log, LedgerEvent};
pub use hashing::keccak256;
pub use ports::*;
pub use session::*;
