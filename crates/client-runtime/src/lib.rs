//! # ResumeChain Client Runtime
//!
//! Composition root of the confidential ledger client.
//!
//! ## Wiring
//!
//! ```text
//! ResumeChainClient
//!   ├── SessionManager ── SessionBootstrapper ── ChainResolver (rc-01/02)
//!   ├── DecryptPipeline ── reads the manager's session slot      (rc-03)
//!   ├── LedgerScanner ──── LedgerReader                          (rc-04)
//!   ├── WriteFacade ────── LedgerWriter                          (rc-05)
//!   ├── Continuity ─────── ContinuityStore                       (rc-06)
//!   └── ContentStore ───── IPFS gateways / pinning               (rc-08)
//! ```
//!
//! `connect` builds the production adapters (JSON-RPC ledger from rc-07,
//! HTTP metadata fetcher, gateway content store); `from_parts` takes
//! injected adapters and is what the tests use.
//!
//! ## Startup Sequence
//!
//! 1. Load `ClientConfig` (defaults, then environment overrides)
//! 2. `validate()`
//! 3. `ClientConfig::init_tracing()`
//! 4. `ResumeChainClient::connect`
//! 5. `start_session()` before the first decrypt

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod client;
pub mod config;
pub mod document;
pub mod error;

pub use adapters::UnavailableRelayer;
pub use client::{ClientParts, PublishedResume, ResumeChainClient, SessionBackends};
pub use config::{ClientConfig, ConfigError};
pub use document::{anchor_digest, DirectoryEntry, DirectoryFilter, ResumeDraft};
pub use error::ClientError;
