//! # Ports Module
//!
//! Outbound dependencies of the bootstrapper: the relayer SDK, its loader,
//! the mock metadata endpoint and the mock session factory.

pub mod outbound;

pub use outbound::*;
