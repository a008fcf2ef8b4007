//! # Resume Telemetry
//!
//! `tracing` subscriber setup shared by every binary and test harness that
//! embeds the ResumeChain client.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use resume_telemetry::{init_tracing, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_tracing(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `resumechain-client` | Service name on every log line |
//! | `RC_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directives |
//! | `RC_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `RC_JSON_LOGS` | `false` (`true` in containers) | JSON instead of pretty output |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// The filter directives could not be parsed.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("Failed to install subscriber: {0}")]
    Install(String),
}

/// Span carrying the subsystem id, for grouping a multi-step operation.
///
/// ```rust,ignore
/// let _span = subsystem_span!("bootstrap", subsystem = "rc-02", chain_id = 31337).entered();
/// ```
#[macro_export]
macro_rules! subsystem_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
