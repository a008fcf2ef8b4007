//! # Session Bootstrap Configuration

use serde::{Deserialize, Serialize};

use crate::domain::SdkInitOptions;

/// Default path of the relayer metadata on a local development node.
pub const DEFAULT_METADATA_PATH: &str = "fhevm/relayer-metadata";

/// Session bootstrap configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Path of the relayer metadata, relative to the mock endpoint.
    pub metadata_path: String,

    /// Timeout of the metadata request in milliseconds.
    pub metadata_timeout_ms: u64,

    /// Options handed to the SDK init routine.
    #[serde(default)]
    pub init_options: SdkInitOptions,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            metadata_path: DEFAULT_METADATA_PATH.to_string(),
            metadata_timeout_ms: 3_000,
            init_options: SdkInitOptions::default(),
        }
    }
}

impl BootstrapConfig {
    /// Create a config for testing (short timeout).
    pub fn for_testing() -> Self {
        Self {
            metadata_timeout_ms: 200,
            ..Self::default()
        }
    }
}
