//! # Domain Module
//!
//! Core types for network resolution.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
