//! # Scanner Configuration

use serde::{Deserialize, Serialize};

/// Ledger scanner configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Reads kept in flight at once. Values below 1 are treated as 1.
    pub max_concurrent_reads: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_reads: 8,
        }
    }
}

impl ScannerConfig {
    /// Create a config for testing (small window to exercise interleaving).
    pub fn for_testing() -> Self {
        Self {
            max_concurrent_reads: 3,
        }
    }

    /// Effective concurrency.
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_reads.max(1)
    }
}
