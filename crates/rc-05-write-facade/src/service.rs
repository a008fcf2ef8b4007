//! # Write Façade Service

use parking_lot::{Mutex, RwLock};
use shared_types::{
    decode_log, Address, Bytes32, LedgerCall, LedgerEvent, LedgerWriter, Receipt,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{CreateOutcome, WriteError};

#[derive(Debug, Default)]
struct FacadeState {
    last_message: Option<String>,
    last_resume_id: Option<u64>,
    last_section_hash: Option<Bytes32>,
}

/// Mutating ledger operations.
#[derive(Default)]
pub struct WriteFacade {
    writer: RwLock<Option<Arc<dyn LedgerWriter>>>,
    state: Mutex<FacadeState>,
}

impl WriteFacade {
    /// Create a façade; `None` means no wallet is connected yet.
    pub fn new(writer: Option<Arc<dyn LedgerWriter>>) -> Self {
        Self {
            writer: RwLock::new(writer),
            state: Mutex::new(FacadeState::default()),
        }
    }

    /// Connects, switches or disconnects the writing wallet.
    pub fn set_writer(&self, writer: Option<Arc<dyn LedgerWriter>>) {
        *self.writer.write() = writer;
    }

    /// True when a signer is connected and the contract is deployed.
    pub fn can_write(&self) -> bool {
        self.connected().is_some()
    }

    /// Status line of the last successful write, e.g. `ResumeCreated id=7`.
    pub fn last_message(&self) -> Option<String> {
        self.state.lock().last_message.clone()
    }

    /// Id of the last resume created through this façade.
    pub fn last_resume_id(&self) -> Option<u64> {
        self.state.lock().last_resume_id
    }

    /// Hash of the last section upserted through this façade.
    pub fn last_section_hash(&self) -> Option<Bytes32> {
        self.state.lock().last_section_hash
    }

    fn connected(&self) -> Option<(Arc<dyn LedgerWriter>, Address)> {
        let writer = self.writer.read().clone()?;
        let contract = writer.contract_address()?;
        Some((writer, contract))
    }

    fn record_message(&self, message: String) {
        info!("[rc-05] {}", message);
        self.state.lock().last_message = Some(message);
    }

    /// Creates a resume and reports its new id.
    ///
    /// A receipt without a `ResumeCreated` event is still a success; the id
    /// is then `None` and a warning is logged.
    pub async fn create_resume(
        &self,
        resume_hash: Bytes32,
        is_public: bool,
    ) -> Result<CreateOutcome, WriteError> {
        let (writer, contract) = self.connected().ok_or(WriteError::NotConnected)?;
        let receipt = writer
            .submit(LedgerCall::CreateResume {
                resume_hash,
                is_public,
            })
            .await?;

        let resume_id = created_id(&receipt, contract);
        match resume_id {
            Some(id) => {
                self.state.lock().last_resume_id = Some(id);
                self.record_message(format!("ResumeCreated id={id}"));
            }
            None => warn!(
                "[rc-05] createResume {} confirmed without a ResumeCreated event from {}; id unknown",
                receipt.tx_hash, contract
            ),
        }

        Ok(CreateOutcome {
            tx_hash: receipt.tx_hash,
            resume_id,
        })
    }

    /// Replaces a resume's digest and visibility.
    pub async fn update_resume(
        &self,
        resume_id: u64,
        new_hash: Bytes32,
        is_public: bool,
    ) -> Result<Option<Bytes32>, WriteError> {
        let call = LedgerCall::UpdateResume {
            resume_id,
            new_hash,
            is_public,
        };
        self.submit(call, format!("ResumeUpdated id={resume_id}"))
            .await
    }

    /// Lets `viewer` see the resume.
    pub async fn grant_access(
        &self,
        resume_id: u64,
        viewer: Address,
    ) -> Result<Option<Bytes32>, WriteError> {
        let call = LedgerCall::GrantAccess { resume_id, viewer };
        self.submit(call, format!("AccessGranted -> {viewer}")).await
    }

    /// Withdraws `viewer`'s access.
    pub async fn revoke_access(
        &self,
        resume_id: u64,
        viewer: Address,
    ) -> Result<Option<Bytes32>, WriteError> {
        let call = LedgerCall::RevokeAccess { resume_id, viewer };
        self.submit(call, format!("AccessRevoked -> {viewer}")).await
    }

    /// Creates or replaces a section.
    pub async fn upsert_section(
        &self,
        resume_id: u64,
        section_hash: Bytes32,
    ) -> Result<Option<Bytes32>, WriteError> {
        let call = LedgerCall::UpsertSection {
            resume_id,
            section_hash,
        };
        let tx_hash = self
            .submit(call, format!("SectionUpserted id={resume_id}"))
            .await?;
        if tx_hash.is_some() {
            self.state.lock().last_section_hash = Some(section_hash);
        }
        Ok(tx_hash)
    }

    /// Endorses one section.
    pub async fn endorse_section(
        &self,
        resume_id: u64,
        section_hash: Bytes32,
    ) -> Result<Option<Bytes32>, WriteError> {
        let call = LedgerCall::EndorseSection {
            resume_id,
            section_hash,
        };
        self.submit(call, format!("Endorsed {resume_id}")).await
    }

    /// Endorses the resume as a whole.
    pub async fn endorse_resume(&self, resume_id: u64) -> Result<Option<Bytes32>, WriteError> {
        let call = LedgerCall::EndorseResume { resume_id };
        self.submit(call, format!("Endorsed resume {resume_id}"))
            .await
    }

    /// Submits `call` if connected; `Ok(None)` otherwise.
    async fn submit(
        &self,
        call: LedgerCall,
        message: String,
    ) -> Result<Option<Bytes32>, WriteError> {
        let Some((writer, _)) = self.connected() else {
            debug!("[rc-05] Not connected, skipping {}", call.function_name());
            return Ok(None);
        };
        let receipt = writer.submit(call).await?;
        self.record_message(message);
        Ok(Some(receipt.tx_hash))
    }
}

/// Id from the first `ResumeCreated` log emitted by `contract`.
fn created_id(receipt: &Receipt, contract: Address) -> Option<u64> {
    receipt
        .logs
        .iter()
        .filter(|log| log.address == contract)
        .find_map(|log| match decode_log(log)? {
            LedgerEvent::ResumeCreated { resume_id, .. } => Some(resume_id),
            _ => None,
        })
}
