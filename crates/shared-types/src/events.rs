//! # Ledger Event Schema
//!
//! Events emitted by the ResumeChain contract and their log encoding.
//!
//! | Event | Indexed | Data |
//! |-------|---------|------|
//! | `ResumeCreated` | resumeId, owner | resumeHash, isPublic |
//! | `ResumeUpdated` | resumeId | newHash, isPublic |
//! | `AccessGranted` | resumeId, viewer | - |
//! | `AccessRevoked` | resumeId, viewer | - |
//! | `SectionUpserted` | resumeId, sectionHash | - |
//! | `Endorsed` | resumeId, sectionHash, endorser | - |

use serde::{Deserialize, Serialize};

use crate::abi::{self, Word};
use crate::entities::{Address, Bytes32, LogEntry};
use crate::hashing::keccak256;

/// `ResumeCreated(uint256,address,bytes32,bool)`
pub const RESUME_CREATED_SIG: &str = "ResumeCreated(uint256,address,bytes32,bool)";
/// `ResumeUpdated(uint256,bytes32,bool)`
pub const RESUME_UPDATED_SIG: &str = "ResumeUpdated(uint256,bytes32,bool)";
/// `AccessGranted(uint256,address)`
pub const ACCESS_GRANTED_SIG: &str = "AccessGranted(uint256,address)";
/// `AccessRevoked(uint256,address)`
pub const ACCESS_REVOKED_SIG: &str = "AccessRevoked(uint256,address)";
/// `SectionUpserted(uint256,bytes32)`
pub const SECTION_UPSERTED_SIG: &str = "SectionUpserted(uint256,bytes32)";
/// `Endorsed(uint256,bytes32,address)`
pub const ENDORSED_SIG: &str = "Endorsed(uint256,bytes32,address)";

/// Topic 0 for an event signature.
#[must_use]
pub fn event_topic(signature: &str) -> Bytes32 {
    keccak256(signature.as_bytes())
}

/// A decoded ResumeChain event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// A resume was created.
    ResumeCreated {
        /// Newly assigned id.
        resume_id: u64,
        /// Creator.
        owner: Address,
        /// Content digest.
        resume_hash: Bytes32,
        /// Initial visibility.
        is_public: bool,
    },
    /// A resume was updated.
    ResumeUpdated {
        /// Updated resume.
        resume_id: u64,
        /// New content digest.
        new_hash: Bytes32,
        /// New visibility.
        is_public: bool,
    },
    /// A viewer was granted access.
    AccessGranted {
        /// Resume.
        resume_id: u64,
        /// Viewer account.
        viewer: Address,
    },
    /// A viewer's access was revoked.
    AccessRevoked {
        /// Resume.
        resume_id: u64,
        /// Viewer account.
        viewer: Address,
    },
    /// A section was created or replaced.
    SectionUpserted {
        /// Resume.
        resume_id: u64,
        /// Section digest.
        section_hash: Bytes32,
    },
    /// A section or whole resume was endorsed.
    Endorsed {
        /// Resume.
        resume_id: u64,
        /// Section digest (zero for a whole-resume endorsement).
        section_hash: Bytes32,
        /// Endorsing account.
        endorser: Address,
    },
}

impl LedgerEvent {
    /// Event name as declared in the contract.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::ResumeCreated { .. } => "ResumeCreated",
            LedgerEvent::ResumeUpdated { .. } => "ResumeUpdated",
            LedgerEvent::AccessGranted { .. } => "AccessGranted",
            LedgerEvent::AccessRevoked { .. } => "AccessRevoked",
            LedgerEvent::SectionUpserted { .. } => "SectionUpserted",
            LedgerEvent::Endorsed { .. } => "Endorsed",
        }
    }

    /// Encodes the event as the log the contract would emit.
    #[must_use]
    pub fn to_log(&self, contract: Address) -> LogEntry {
        let topic = |w: Word| Bytes32(w);
        let (signature, topics, data): (&str, Vec<Bytes32>, Vec<Word>) = match self {
            LedgerEvent::ResumeCreated {
                resume_id,
                owner,
                resume_hash,
                is_public,
            } => (
                RESUME_CREATED_SIG,
                vec![topic(abi::u64_word(*resume_id)), topic(abi::address_word(owner))],
                vec![resume_hash.0, abi::bool_word(*is_public)],
            ),
            LedgerEvent::ResumeUpdated {
                resume_id,
                new_hash,
                is_public,
            } => (
                RESUME_UPDATED_SIG,
                vec![topic(abi::u64_word(*resume_id))],
                vec![new_hash.0, abi::bool_word(*is_public)],
            ),
            LedgerEvent::AccessGranted { resume_id, viewer } => (
                ACCESS_GRANTED_SIG,
                vec![topic(abi::u64_word(*resume_id)), topic(abi::address_word(viewer))],
                vec![],
            ),
            LedgerEvent::AccessRevoked { resume_id, viewer } => (
                ACCESS_REVOKED_SIG,
                vec![topic(abi::u64_word(*resume_id)), topic(abi::address_word(viewer))],
                vec![],
            ),
            LedgerEvent::SectionUpserted {
                resume_id,
                section_hash,
            } => (
                SECTION_UPSERTED_SIG,
                vec![topic(abi::u64_word(*resume_id)), *section_hash],
                vec![],
            ),
            LedgerEvent::Endorsed {
                resume_id,
                section_hash,
                endorser,
            } => (
                ENDORSED_SIG,
                vec![
                    topic(abi::u64_word(*resume_id)),
                    *section_hash,
                    topic(abi::address_word(endorser)),
                ],
                vec![],
            ),
        };

        let mut all_topics = Vec::with_capacity(topics.len() + 1);
        all_topics.push(event_topic(signature));
        all_topics.extend(topics);
        LogEntry {
            address: contract,
            topics: all_topics,
            data: data.concat(),
        }
    }
}

/// Decodes a log into a ResumeChain event.
///
/// Returns None for logs of other events or with malformed fields.
#[must_use]
pub fn decode_log(log: &LogEntry) -> Option<LedgerEvent> {
    let topic0 = log.topics.first()?;
    let indexed = |i: usize| log.topics.get(i).map(|t| t.0);
    let data = |i: usize| abi::word_at(&log.data, i);

    if *topic0 == event_topic(RESUME_CREATED_SIG) {
        Some(LedgerEvent::ResumeCreated {
            resume_id: abi::word_to_u64(&indexed(1)?)?,
            owner: abi::word_to_address(&indexed(2)?)?,
            resume_hash: Bytes32(data(0)?),
            is_public: abi::word_to_bool(&data(1)?)?,
        })
    } else if *topic0 == event_topic(RESUME_UPDATED_SIG) {
        Some(LedgerEvent::ResumeUpdated {
            resume_id: abi::word_to_u64(&indexed(1)?)?,
            new_hash: Bytes32(data(0)?),
            is_public: abi::word_to_bool(&data(1)?)?,
        })
    } else if *topic0 == event_topic(ACCESS_GRANTED_SIG) {
        Some(LedgerEvent::AccessGranted {
            resume_id: abi::word_to_u64(&indexed(1)?)?,
            viewer: abi::word_to_address(&indexed(2)?)?,
        })
    } else if *topic0 == event_topic(ACCESS_REVOKED_SIG) {
        Some(LedgerEvent::AccessRevoked {
            resume_id: abi::word_to_u64(&indexed(1)?)?,
            viewer: abi::word_to_address(&indexed(2)?)?,
        })
    } else if *topic0 == event_topic(SECTION_UPSERTED_SIG) {
        Some(LedgerEvent::SectionUpserted {
            resume_id: abi::word_to_u64(&indexed(1)?)?,
            section_hash: Bytes32(indexed(2)?),
        })
    } else if *topic0 == event_topic(ENDORSED_SIG) {
        Some(LedgerEvent::Endorsed {
            resume_id: abi::word_to_u64(&indexed(1)?)?,
            section_hash: Bytes32(indexed(2)?),
            endorser: abi::word_to_address(&indexed(3)?)?,
        })
    } else {
        None
    }
}
