//! # RC-01 Chain Resolver
//!
//! Classifies the network behind a provider as a local mock network or a
//! production network, and finds the endpoint to reach it.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Resolution Rules
//!
//! | Provider | Chain id | Endpoint |
//! |----------|----------|----------|
//! | Bare URL | assumed `31337` | the URL itself |
//! | Live RPC | one `eth_chainId` round trip | mock table entry, if any |
//!
//! A chain id found in the mock table (built-in `31337 → localhost:8545`,
//! merged with caller overrides that take precedence) is a mock network.
//! Anything else is production with no default endpoint.
//!
//! ## Module Structure
//!
//! ```text
//! rc-01-chain-resolver/
//! ├── domain/      # NetworkResolution, MockChainTable, errors
//! ├── ports/       # ChainIdSource, ProviderHandle
//! ├── adapters/    # HttpChainIdSource (JSON-RPC)
//! ├── service.rs   # ChainResolver
//! └── config.rs    # ResolverConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{parse_chain_id_hex, HttpChainIdSource};
pub use config::ResolverConfig;
pub use domain::{
    MockChainTable, NetworkResolution, ResolverError, LOCAL_CHAIN_ID, LOCAL_ENDPOINT,
};
pub use ports::{ChainIdSource, MockChainIdSource, ProviderHandle};
pub use service::ChainResolver;
