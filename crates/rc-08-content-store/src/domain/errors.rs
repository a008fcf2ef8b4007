//! # Domain Errors

use thiserror::Error;

/// Content store error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// No content id given.
    #[error("cid is required")]
    EmptyCid,

    /// Pinning needs credentials that are not configured.
    #[error("{0} not configured")]
    NotConfigured(String),

    /// The HTTP request itself failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The pinning service rejected the request.
    #[error("Pinning failed ({status}): {body}")]
    Pin {
        /// HTTP status.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Every gateway failed; carries the last failure.
    #[error("Failed to fetch IPFS JSON: {0}")]
    AllGatewaysFailed(String),

    /// A response was not the expected JSON.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}
