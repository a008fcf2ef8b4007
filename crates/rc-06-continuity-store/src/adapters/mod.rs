//! # Adapters
//!
//! - [`MemoryContinuityStore`]: process memory only, for tests and headless runs
//! - [`FileContinuityStore`]: a JSON object on disk

pub mod file;
pub mod memory;

pub use file::FileContinuityStore;
pub use memory::MemoryContinuityStore;
