//! # Ledger Scanner Service

use futures::stream::{self, StreamExt};
use shared_types::{Address, Bytes32, Handle, LedgerError, LedgerReader, Record, Section};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::ScannerConfig;
use crate::domain::{ScanFilter, ScanReport};

/// Builds record listings by scanning the ledger.
#[derive(Clone)]
pub struct LedgerScanner {
    reader: Arc<dyn LedgerReader>,
    config: ScannerConfig,
}

impl LedgerScanner {
    /// Create a scanner over `reader`.
    pub fn new(reader: Arc<dyn LedgerReader>, config: ScannerConfig) -> Self {
        Self { reader, config }
    }

    /// Records owned by `owner`, read as `caller`.
    pub async fn list_owned(
        &self,
        owner: Address,
        caller: Option<Address>,
    ) -> Result<Vec<Record>, LedgerError> {
        let (records, _) = self.scan(ScanFilter::OwnedBy(owner), caller).await?;
        Ok(records)
    }

    /// Public records, read anonymously.
    pub async fn list_public(&self) -> Result<Vec<Record>, LedgerError> {
        let (records, _) = self.scan(ScanFilter::Public, None).await?;
        Ok(records)
    }

    /// One full pass over ids `1..next_id`, keeping records that match
    /// `filter`, in ascending id order.
    pub async fn scan(
        &self,
        filter: ScanFilter,
        caller: Option<Address>,
    ) -> Result<(Vec<Record>, ScanReport), LedgerError> {
        let next_id = self.reader.next_id().await?;
        let mut report = ScanReport::default();
        if next_id <= 1 {
            debug!("[rc-04] Ledger is empty (next id {})", next_id);
            return Ok((Vec::new(), report));
        }

        let reader = &self.reader;
        let results: Vec<(u64, Result<Record, LedgerError>)> = stream::iter(1..next_id)
            .map(|id| async move { (id, reader.read(id, caller).await) })
            .buffered(self.config.concurrency())
            .collect()
            .await;

        let mut records = Vec::new();
        for (id, result) in results {
            report.scanned += 1;
            match result {
                Ok(record) if filter.matches(&record) => {
                    report.matched += 1;
                    records.push(record);
                }
                Ok(_) => {}
                Err(e) => {
                    report.failed += 1;
                    debug!("[rc-04] Skipping record {}: {}", id, e);
                }
            }
        }

        info!(
            "[rc-04] Scan {:?}: scanned={} failed={} matched={}",
            filter, report.scanned, report.failed, report.matched
        );
        Ok((records, report))
    }

    /// Reads a single record as `caller`.
    pub async fn get(&self, id: u64, caller: Option<Address>) -> Result<Record, LedgerError> {
        self.reader.read(id, caller).await
    }

    /// Encrypted endorsement counter of a section.
    pub async fn encrypted_endorsement_count(
        &self,
        id: u64,
        section_hash: Bytes32,
    ) -> Result<Handle, LedgerError> {
        self.reader.encrypted_endorsement_count(id, section_hash).await
    }

    /// A section with its encrypted counter.
    pub async fn section(&self, id: u64, section_hash: Bytes32) -> Result<Section, LedgerError> {
        let encrypted_endorsement_count = self.encrypted_endorsement_count(id, section_hash).await?;
        Ok(Section {
            resume_id: id,
            section_hash,
            encrypted_endorsement_count,
        })
    }
}
