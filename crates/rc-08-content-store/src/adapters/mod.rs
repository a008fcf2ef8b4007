//! # Adapters

pub mod gateway;

pub use gateway::GatewayContentStore;
