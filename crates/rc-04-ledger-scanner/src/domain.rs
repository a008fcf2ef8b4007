//! # Domain Types

use serde::{Deserialize, Serialize};
use shared_types::{Address, Record};

/// Which records a scan keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanFilter {
    /// Records owned by this account.
    OwnedBy(Address),
    /// Records flagged public.
    Public,
}

impl ScanFilter {
    /// Returns true if `record` passes the filter.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            ScanFilter::OwnedBy(owner) => record.is_owned_by(owner),
            ScanFilter::Public => record.is_public,
        }
    }
}

/// Statistics of one scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Ids attempted.
    pub scanned: u64,
    /// Reads that failed and were skipped.
    pub failed: u64,
    /// Records that passed the filter.
    pub matched: u64,
}
