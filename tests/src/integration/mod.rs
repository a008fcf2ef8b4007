//! Cross-subsystem integration flows.

pub mod access_flows;
pub mod continuity_flows;
pub mod rpc_flows;
pub mod session_flows;
