//! # Domain Module
//!
//! RPC error taxonomy and the deployment address book.

pub mod address_book;
pub mod errors;

pub use address_book::*;
pub use errors::*;
