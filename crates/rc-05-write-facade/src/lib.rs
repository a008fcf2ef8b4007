//! # RC-05 Write Façade
//!
//! Uniform "submit, wait for confirmation, read the receipt" wrapper around
//! the mutating ledger calls.
//!
//! **Subsystem ID:** 05
//!
//! Every write needs a connected signer and a contract deployed on the
//! current network. Without them the writes quietly do nothing, except
//! `create_resume`, whose callers need the new id and therefore get
//! [`WriteError::NotConnected`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod service;

pub use domain::{CreateOutcome, WriteError};
pub use service::WriteFacade;
