//! # Shared Ports
//!
//! Outbound traits used by more than one subsystem: the ledger (read and
//! write halves) and the wallet signer. Adapters live in `rc-07-ledger-rpc`
//! and `rc-03-decrypt-pipeline`; [`MockLedger`] is the in-memory double used
//! by every subsystem's tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::entities::{Address, Bytes32, Handle, Receipt, Record};
use crate::errors::{LedgerError, SignerError};
use crate::events::LedgerEvent;
use crate::hashing::keccak256;
use crate::session::TypedDataPayload;

/// Wallet signer - outbound port.
#[async_trait]
pub trait TypedDataSigner: Send + Sync {
    /// Account the signer signs for.
    async fn address(&self) -> Result<Address, SignerError>;

    /// Signs an EIP-712 payload, returning a `0x`-prefixed 65-byte signature.
    async fn sign_typed_data(&self, payload: &TypedDataPayload) -> Result<String, SignerError>;
}

/// Ledger read access - outbound port.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// The monotonic next-id counter (`nextResumeId()`).
    async fn next_id(&self) -> Result<u64, LedgerError>;

    /// Reads one record. `caller` is the account the read is performed as;
    /// it scopes the returned access handle.
    async fn read(&self, id: u64, caller: Option<Address>) -> Result<Record, LedgerError>;

    /// Encrypted endorsement counter of a section.
    async fn encrypted_endorsement_count(
        &self,
        id: u64,
        section_hash: Bytes32,
    ) -> Result<Handle, LedgerError>;
}

/// A mutating ledger operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerCall {
    /// `createResume(bytes32,bool)`
    CreateResume {
        /// Content digest.
        resume_hash: Bytes32,
        /// Visibility.
        is_public: bool,
    },
    /// `updateResume(uint256,bytes32,bool)`
    UpdateResume {
        /// Target resume.
        resume_id: u64,
        /// New content digest.
        new_hash: Bytes32,
        /// New visibility.
        is_public: bool,
    },
    /// `grantAccess(uint256,address)`
    GrantAccess {
        /// Target resume.
        resume_id: u64,
        /// Viewer account.
        viewer: Address,
    },
    /// `revokeAccess(uint256,address)`
    RevokeAccess {
        /// Target resume.
        resume_id: u64,
        /// Viewer account.
        viewer: Address,
    },
    /// `upsertSection(uint256,bytes32)`
    UpsertSection {
        /// Target resume.
        resume_id: u64,
        /// Section digest.
        section_hash: Bytes32,
    },
    /// `endorseSection(uint256,bytes32)`
    EndorseSection {
        /// Target resume.
        resume_id: u64,
        /// Section digest.
        section_hash: Bytes32,
    },
    /// `endorseResume(uint256)`
    EndorseResume {
        /// Target resume.
        resume_id: u64,
    },
}

impl LedgerCall {
    /// Contract function name.
    #[must_use]
    pub fn function_name(&self) -> &'static str {
        match self {
            LedgerCall::CreateResume { .. } => "createResume",
            LedgerCall::UpdateResume { .. } => "updateResume",
            LedgerCall::GrantAccess { .. } => "grantAccess",
            LedgerCall::RevokeAccess { .. } => "revokeAccess",
            LedgerCall::UpsertSection { .. } => "upsertSection",
            LedgerCall::EndorseSection { .. } => "endorseSection",
            LedgerCall::EndorseResume { .. } => "endorseResume",
        }
    }
}

/// Ledger write access - outbound port.
///
/// A writer is bound to one signing account and one contract.
#[async_trait]
pub trait LedgerWriter: Send + Sync {
    /// Target contract; None when the network has no deployment.
    fn contract_address(&self) -> Option<Address>;

    /// Submits one transaction and waits for its confirmation.
    async fn submit(&self, call: LedgerCall) -> Result<Receipt, LedgerError>;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

#[derive(Default)]
struct MockLedgerState {
    records: BTreeMap<u64, Record>,
    next_id: Option<u64>,
    failing_reads: HashSet<u64>,
    fail_next_id: bool,
    emit_events: bool,
    access: HashMap<(u64, Address), Handle>,
    sections: HashMap<(u64, Bytes32), Handle>,
    submitted: Vec<LedgerCall>,
    reads: Vec<(u64, Option<Address>)>,
    tx_counter: u64,
    clock: u64,
}

/// In-memory ledger for tests.
///
/// Writes are applied immediately and emit the same events the contract
/// would, unless event emission is switched off.
pub struct MockLedger {
    contract: Option<Address>,
    sender: Address,
    state: Mutex<MockLedgerState>,
}

impl MockLedger {
    /// Creates an empty ledger deployed at `contract`, writing as `sender`.
    pub fn new(contract: Address, sender: Address) -> Self {
        Self {
            contract: Some(contract),
            sender,
            state: Mutex::new(MockLedgerState {
                emit_events: true,
                clock: 1_700_000_000,
                ..Default::default()
            }),
        }
    }

    /// Creates a ledger with no deployment on the current network.
    pub fn undeployed(sender: Address) -> Self {
        let mut ledger = Self::new(Address::ZERO, sender);
        ledger.contract = None;
        ledger
    }

    /// Inserts a record snapshot.
    pub fn insert_record(&self, record: Record) {
        self.state.lock().records.insert(record.id, record);
    }

    /// Makes reads of `id` fail as a reverted call.
    pub fn fail_read(&self, id: u64) {
        self.state.lock().failing_reads.insert(id);
    }

    /// Makes `next_id()` fail with a connectivity error.
    pub fn fail_next_id(&self, fail: bool) {
        self.state.lock().fail_next_id = fail;
    }

    /// Overrides the next-id counter.
    pub fn set_next_id(&self, next_id: u64) {
        self.state.lock().next_id = Some(next_id);
    }

    /// Turns event emission on or off.
    pub fn set_emit_events(&self, emit: bool) {
        self.state.lock().emit_events = emit;
    }

    /// Calls submitted so far.
    pub fn submitted(&self) -> Vec<LedgerCall> {
        self.state.lock().submitted.clone()
    }

    /// Reads performed so far, as `(id, caller)`.
    pub fn reads(&self) -> Vec<(u64, Option<Address>)> {
        self.state.lock().reads.clone()
    }

    /// Handle a viewer is granted for a resume.
    #[must_use]
    pub fn access_handle(resume_id: u64, viewer: &Address) -> Handle {
        let mut preimage = resume_id.to_be_bytes().to_vec();
        preimage.extend_from_slice(viewer.as_bytes());
        Handle(keccak256(&preimage).0)
    }

    fn apply(&self, state: &mut MockLedgerState, call: &LedgerCall) -> Result<LedgerEvent, LedgerError> {
        state.clock += 1;
        let now = state.clock;
        let sender = self.sender;
        let owned = |state: &MockLedgerState, id: u64| -> Result<(), LedgerError> {
            match state.records.get(&id) {
                Some(r) if r.owner == sender => Ok(()),
                Some(_) => Err(LedgerError::Reverted("not owner".to_string())),
                None => Err(LedgerError::Reverted("no resume".to_string())),
            }
        };

        let event = match call {
            LedgerCall::CreateResume {
                resume_hash,
                is_public,
            } => {
                let id = state
                    .next_id
                    .unwrap_or_else(|| state.records.keys().next_back().map_or(1, |k| k + 1));
                state.records.insert(
                    id,
                    Record {
                        id,
                        owner: sender,
                        content_hash: *resume_hash,
                        is_public: *is_public,
                        created_at: now,
                        updated_at: now,
                        caller_access: Handle::NULL,
                    },
                );
                state.next_id = Some(id + 1);
                state.access.insert((id, sender), Self::access_handle(id, &sender));
                LedgerEvent::ResumeCreated {
                    resume_id: id,
                    owner: sender,
                    resume_hash: *resume_hash,
                    is_public: *is_public,
                }
            }
            LedgerCall::UpdateResume {
                resume_id,
                new_hash,
                is_public,
            } => {
                owned(state, *resume_id)?;
                if let Some(r) = state.records.get_mut(resume_id) {
                    r.content_hash = *new_hash;
                    r.is_public = *is_public;
                    r.updated_at = now;
                }
                LedgerEvent::ResumeUpdated {
                    resume_id: *resume_id,
                    new_hash: *new_hash,
                    is_public: *is_public,
                }
            }
            LedgerCall::GrantAccess { resume_id, viewer } => {
                owned(state, *resume_id)?;
                state
                    .access
                    .insert((*resume_id, *viewer), Self::access_handle(*resume_id, viewer));
                LedgerEvent::AccessGranted {
                    resume_id: *resume_id,
                    viewer: *viewer,
                }
            }
            LedgerCall::RevokeAccess { resume_id, viewer } => {
                owned(state, *resume_id)?;
                state.access.remove(&(*resume_id, *viewer));
                LedgerEvent::AccessRevoked {
                    resume_id: *resume_id,
                    viewer: *viewer,
                }
            }
            LedgerCall::UpsertSection {
                resume_id,
                section_hash,
            } => {
                owned(state, *resume_id)?;
                let mut preimage = section_hash.0.to_vec();
                preimage.extend_from_slice(&resume_id.to_be_bytes());
                state
                    .sections
                    .insert((*resume_id, *section_hash), Handle(keccak256(&preimage).0));
                LedgerEvent::SectionUpserted {
                    resume_id: *resume_id,
                    section_hash: *section_hash,
                }
            }
            LedgerCall::EndorseSection {
                resume_id,
                section_hash,
            } => {
                if !state.sections.contains_key(&(*resume_id, *section_hash)) {
                    return Err(LedgerError::Reverted("no section".to_string()));
                }
                LedgerEvent::Endorsed {
                    resume_id: *resume_id,
                    section_hash: *section_hash,
                    endorser: sender,
                }
            }
            LedgerCall::EndorseResume { resume_id } => {
                if !state.records.contains_key(resume_id) {
                    return Err(LedgerError::Reverted("no resume".to_string()));
                }
                LedgerEvent::Endorsed {
                    resume_id: *resume_id,
                    section_hash: Bytes32::ZERO,
                    endorser: sender,
                }
            }
        };
        Ok(event)
    }
}

#[async_trait]
impl LedgerReader for MockLedger {
    async fn next_id(&self) -> Result<u64, LedgerError> {
        let state = self.state.lock();
        if state.fail_next_id {
            return Err(LedgerError::Rpc("Mock failure".to_string()));
        }
        Ok(state
            .next_id
            .unwrap_or_else(|| state.records.keys().next_back().map_or(1, |k| k + 1)))
    }

    async fn read(&self, id: u64, caller: Option<Address>) -> Result<Record, LedgerError> {
        let mut state = self.state.lock();
        state.reads.push((id, caller));
        if state.failing_reads.contains(&id) {
            return Err(LedgerError::Reverted(format!("read {id} reverted")));
        }
        let mut record = state
            .records
            .get(&id)
            .cloned()
            .ok_or(LedgerError::NotFound(id))?;
        record.caller_access = caller
            .and_then(|c| state.access.get(&(id, c)).copied())
            .unwrap_or(Handle::NULL);
        Ok(record)
    }

    async fn encrypted_endorsement_count(
        &self,
        id: u64,
        section_hash: Bytes32,
    ) -> Result<Handle, LedgerError> {
        Ok(self
            .state
            .lock()
            .sections
            .get(&(id, section_hash))
            .copied()
            .unwrap_or(Handle::NULL))
    }
}

#[async_trait]
impl LedgerWriter for MockLedger {
    fn contract_address(&self) -> Option<Address> {
        self.contract
    }

    async fn submit(&self, call: LedgerCall) -> Result<Receipt, LedgerError> {
        let mut state = self.state.lock();
        let event = self.apply(&mut state, &call)?;
        state.submitted.push(call);
        state.tx_counter += 1;
        let tx_hash = keccak256(&state.tx_counter.to_be_bytes());
        let logs = match (state.emit_events, self.contract) {
            (true, Some(contract)) => vec![event.to_log(contract)],
            _ => vec![],
        };
        Ok(Receipt {
            tx_hash,
            block_number: Some(state.tx_counter),
            logs,
        })
    }
}
