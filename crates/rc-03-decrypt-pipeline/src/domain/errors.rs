//! # Domain Errors

use shared_types::{SessionError, SignerError};
use thiserror::Error;

/// Decrypt pipeline error types.
///
/// Every variant aborts the whole batch; no partial results are returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecryptError {
    /// The wallet refused to sign the authorization.
    #[error("Signature rejected: {0}")]
    SignatureRejected(String),

    /// The wallet could not be reached.
    #[error("Signer unavailable: {0}")]
    SignerUnavailable(String),

    /// The session failed (keypair, payload or relayer call).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The authorization payload cannot be hashed.
    #[error("Invalid authorization payload: {0}")]
    InvalidPayload(String),
}

impl From<SignerError> for DecryptError {
    fn from(err: SignerError) -> Self {
        match err {
            SignerError::Rejected(reason) => DecryptError::SignatureRejected(reason),
            SignerError::Unavailable(reason) => DecryptError::SignerUnavailable(reason),
        }
    }
}
