//! # Domain Errors

use thiserror::Error;

/// Continuity store error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContinuityError {
    /// Reading or writing the backing file failed.
    #[error("Continuity store I/O error: {message}")]
    Io {
        /// Underlying error.
        message: String,
    },

    /// The backing file is not a JSON object of strings.
    #[error("Continuity store corrupted: {message}")]
    Corrupt {
        /// Parse error.
        message: String,
    },
}

impl From<std::io::Error> for ContinuityError {
    fn from(err: std::io::Error) -> Self {
        ContinuityError::Io {
            message: err.to_string(),
        }
    }
}
