//! # Domain Module
//!
//! Bootstrap states, the SDK capability contract and errors.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
