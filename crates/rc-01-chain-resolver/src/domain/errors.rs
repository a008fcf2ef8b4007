//! # Domain Errors

use thiserror::Error;

/// Chain resolver error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolverError {
    /// The provider could not be queried for its chain id.
    #[error("Failed to query chain id: {0}")]
    ChainIdQuery(String),

    /// The provider answered with something that is not a chain id.
    #[error("Invalid chain id: {0}")]
    InvalidChainId(String),
}
