//! # RC-02 Session Bootstrap
//!
//! Drives the linear state machine that turns a provider into a ready
//! encryption session, and keeps the one "current session" slot the rest of
//! the client reads from.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## State Machine
//!
//! ```text
//! idle → sdk-loading → sdk-loaded → sdk-initializing → sdk-initialized → creating → ready
//!   │                                                                       ▲
//!   └── mock network with relayer metadata ─────────────────────────────────┘
//!
//! any state ──cancel──→ aborted        any state ──error──→ failed
//! ```
//!
//! Load and init steps are skipped when the process-wide [`SdkRegistry`]
//! already holds a loaded or initialized SDK. Terminal outcomes travel
//! through the `Result`, never through the status callback.
//!
//! ## Restartability
//!
//! [`SessionManager`] numbers every run. Starting a run cancels the previous
//! one, and only the latest generation may publish a session.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod cancellation;
pub mod config;
pub mod domain;
pub mod manager;
pub mod ports;
pub mod registry;
pub mod service;

pub use adapters::HttpMetadataFetcher;
pub use cancellation::CancellationToken;
pub use config::BootstrapConfig;
pub use domain::{BootstrapError, BootstrapStatus, Capability, CapabilitySet, SdkInitOptions};
pub use manager::{SessionManager, SessionState};
pub use ports::{MetadataFetcher, MockSessionFactory, RelayerSdk, SdkLoader};
pub use registry::SdkRegistry;
pub use service::SessionBootstrapper;
