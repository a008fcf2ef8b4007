//! # Decrypt Pipeline Configuration

use serde::{Deserialize, Serialize};

/// Validity window of a decrypt authorization, in days.
pub const DEFAULT_DURATION_DAYS: u64 = 365;

/// Decrypt pipeline configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptConfig {
    /// Authorization validity in days, starting at the current time.
    pub duration_days: u64,
}

impl Default for DecryptConfig {
    fn default() -> Self {
        Self {
            duration_days: DEFAULT_DURATION_DAYS,
        }
    }
}

impl DecryptConfig {
    /// Create a config for testing (one-day window).
    pub fn for_testing() -> Self {
        Self { duration_days: 1 }
    }
}
