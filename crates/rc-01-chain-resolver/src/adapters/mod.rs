//! # Adapters
//!
//! Concrete implementations of the resolver's outbound port.

pub mod http;

pub use http::{parse_chain_id_hex, HttpChainIdSource};
