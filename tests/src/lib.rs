//! # ResumeChain Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs         # Simulated node, fixed sessions, client builders
//! └── integration/        # Cross-subsystem flows
//!     ├── access_flows.rs     # write → scan → decrypt
//!     ├── rpc_flows.rs        # ledger ports over JSON-RPC
//!     ├── session_flows.rs    # bootstrap generations feeding decrypts
//!     └── continuity_flows.rs # reload and contract change
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p rc-tests
//!
//! # By category
//! cargo test -p rc-tests integration::rpc_flows
//!
//! # Benchmarks
//! cargo bench -p rc-tests
//! ```

pub mod fixtures;
pub mod integration;
