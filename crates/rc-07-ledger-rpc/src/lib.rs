//! # RC-07 Ledger RPC
//!
//! Talks to the ResumeChain contract over Ethereum JSON-RPC and implements
//! the shared ledger ports on top of it.
//!
//! **Subsystem ID:** 07
//!
//! ## Responsibilities
//!
//! - ABI encoding of the contract's functions and decoding of its returns
//! - `eth_call` reads with an explicit `from`, so caller-scoped handles are
//!   scoped to the right account
//! - `eth_sendTransaction` writes followed by receipt polling with a timeout
//! - The deployment address book: chain id → contract address
//!
//! ## Architecture
//!
//! ```text
//! LedgerReader / LedgerWriter ──▶ JsonRpcLedger ──▶ RpcTransport ──▶ node
//!                                      │                 │
//!                                    codec          HttpTransport
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod codec;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::HttpTransport;
pub use config::RpcConfig;
pub use domain::*;
pub use ports::{MockTransport, RpcTransport};
pub use service::JsonRpcLedger;
