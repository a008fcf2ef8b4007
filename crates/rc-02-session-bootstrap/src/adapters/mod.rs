//! # Adapters

pub mod metadata;

pub use metadata::HttpMetadataFetcher;
