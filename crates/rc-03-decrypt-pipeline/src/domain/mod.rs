//! # Domain Module

pub mod errors;
pub mod response;
pub mod values;

pub use errors::*;
pub use response::*;
pub use values::*;
