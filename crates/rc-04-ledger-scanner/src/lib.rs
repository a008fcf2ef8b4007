//! # RC-04 Ledger Scanner
//!
//! The ledger has no enumeration index, so listings are built by a full
//! scan: read the next-id counter once, then read every id below it.
//!
//! **Subsystem ID:** 04
//!
//! ## Guarantees
//!
//! - Output is in ascending id order, whatever order reads complete in.
//! - A record that fails to read is omitted; the scan never aborts on one
//!   bad id. Only a failing counter read is an error.
//! - Owner listings read as the caller so each record's access handle is
//!   scoped to that account. Public listings read anonymously.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod domain;
pub mod service;

pub use config::ScannerConfig;
pub use domain::{ScanFilter, ScanReport};
pub use service::LedgerScanner;
