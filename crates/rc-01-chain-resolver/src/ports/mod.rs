//! # Ports Module
//!
//! Outbound dependency of the resolver: something that can report a chain id.

pub mod outbound;

pub use outbound::*;
