//! # Domain Errors

use rc_01_chain_resolver::ResolverError;
use shared_types::SessionError;
use thiserror::Error;

use super::Capability;

/// Session bootstrap error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    /// The run was cancelled. Not a failure.
    #[error("aborted")]
    Aborted,

    /// Network resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolverError),

    /// The SDK could not be fetched.
    #[error("Failed to load relayer SDK: {0}")]
    SdkLoad(String),

    /// No SDK is present where one was expected.
    #[error("Relayer SDK is not loaded")]
    SdkNotLoaded,

    /// The SDK is present but lacks a required operation.
    #[error("Relayer SDK has an invalid shape: missing {missing}")]
    InvalidSdkShape {
        /// The first missing capability.
        missing: Capability,
    },

    /// The init routine returned false.
    #[error("Relayer SDK initialization failed")]
    InitFailed,

    /// The init routine errored.
    #[error("Relayer SDK initialization error: {0}")]
    Init(String),

    /// Instance construction failed.
    #[error("Failed to create session: {0}")]
    CreateSession(String),
}

impl BootstrapError {
    /// Returns true for the cancellation outcome.
    pub fn is_aborted(&self) -> bool {
        matches!(self, BootstrapError::Aborted)
    }
}

impl From<SessionError> for BootstrapError {
    fn from(err: SessionError) -> Self {
        BootstrapError::CreateSession(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_loaded_and_invalid_shape_are_distinct() {
        let not_loaded = BootstrapError::SdkNotLoaded.to_string();
        let shape = BootstrapError::InvalidSdkShape {
            missing: Capability::CreateInstance,
        }
        .to_string();
        assert_ne!(not_loaded, shape);
        assert!(shape.contains("createInstance"));
    }

    #[test]
    fn test_only_aborted_is_aborted() {
        assert!(BootstrapError::Aborted.is_aborted());
        assert!(!BootstrapError::InitFailed.is_aborted());
        let resolve: BootstrapError = ResolverError::ChainIdQuery("down".into()).into();
        assert!(!resolve.is_aborted());
        assert_eq!(resolve.to_string(), "Failed to query chain id: down");
    }
}
