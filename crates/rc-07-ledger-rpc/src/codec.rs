//! # Contract Codec
//!
//! Calldata for the ResumeChain functions, decoding of their return data and
//! of JSON-RPC receipts.

use serde::Deserialize;
use shared_types::abi::{encode_call, word_at, word_to_address, word_to_bool, word_to_u64, Token};
use shared_types::{Address, Bytes32, Handle, LedgerCall, LogEntry, Receipt, Record, U256};

use crate::domain::RpcError;

/// `nextResumeId()`
pub const NEXT_RESUME_ID_SIG: &str = "nextResumeId()";
/// `getResume(uint256)`
pub const GET_RESUME_SIG: &str = "getResume(uint256)";
/// `getEncryptedEndorsementCount(uint256,bytes32)`
pub const GET_ENDORSEMENT_COUNT_SIG: &str = "getEncryptedEndorsementCount(uint256,bytes32)";

fn uint(value: u64) -> Token {
    Token::Uint(U256::from(value))
}

/// Calldata for `nextResumeId()`.
pub fn encode_next_id() -> Vec<u8> {
    encode_call(NEXT_RESUME_ID_SIG, &[])
}

/// Calldata for `getResume(id)`.
pub fn encode_get_resume(id: u64) -> Vec<u8> {
    encode_call(GET_RESUME_SIG, &[uint(id)])
}

/// Calldata for `getEncryptedEndorsementCount(id, section_hash)`.
pub fn encode_endorsement_count(id: u64, section_hash: Bytes32) -> Vec<u8> {
    encode_call(
        GET_ENDORSEMENT_COUNT_SIG,
        &[uint(id), Token::Bytes32(section_hash)],
    )
}

/// Solidity signature of a mutating call.
pub fn call_signature(call: &LedgerCall) -> &'static str {
    match call {
        LedgerCall::CreateResume { .. } => "createResume(bytes32,bool)",
        LedgerCall::UpdateResume { .. } => "updateResume(uint256,bytes32,bool)",
        LedgerCall::GrantAccess { .. } => "grantAccess(uint256,address)",
        LedgerCall::RevokeAccess { .. } => "revokeAccess(uint256,address)",
        LedgerCall::UpsertSection { .. } => "upsertSection(uint256,bytes32)",
        LedgerCall::EndorseSection { .. } => "endorseSection(uint256,bytes32)",
        LedgerCall::EndorseResume { .. } => "endorseResume(uint256)",
    }
}

/// Calldata for a mutating call.
pub fn encode_ledger_call(call: &LedgerCall) -> Vec<u8> {
    let args = match call {
        LedgerCall::CreateResume {
            resume_hash,
            is_public,
        } => vec![Token::Bytes32(*resume_hash), Token::Bool(*is_public)],
        LedgerCall::UpdateResume {
            resume_id,
            new_hash,
            is_public,
        } => vec![
            uint(*resume_id),
            Token::Bytes32(*new_hash),
            Token::Bool(*is_public),
        ],
        LedgerCall::GrantAccess { resume_id, viewer }
        | LedgerCall::RevokeAccess { resume_id, viewer } => {
            vec![uint(*resume_id), Token::Address(*viewer)]
        }
        LedgerCall::UpsertSection {
            resume_id,
            section_hash,
        }
        | LedgerCall::EndorseSection {
            resume_id,
            section_hash,
        } => vec![uint(*resume_id), Token::Bytes32(*section_hash)],
        LedgerCall::EndorseResume { resume_id } => vec![uint(*resume_id)],
    };
    encode_call(call_signature(call), &args)
}

fn word(data: &[u8], index: usize, what: &str) -> Result<[u8; 32], RpcError> {
    word_at(data, index)
        .ok_or_else(|| RpcError::Parse(format!("{what}: return data too short ({} bytes)", data.len())))
}

/// Decodes a single `uint` return that must fit in 64 bits.
pub fn decode_u64(data: &[u8]) -> Result<u64, RpcError> {
    let w = word(data, 0, "uint")?;
    word_to_u64(&w).ok_or_else(|| RpcError::Parse("uint does not fit in 64 bits".to_string()))
}

/// Decodes a single `bytes32` handle return.
pub fn decode_handle(data: &[u8]) -> Result<Handle, RpcError> {
    Ok(Handle(word(data, 0, "handle")?))
}

/// Decodes `getResume` return data
/// `(address, bytes32, bool, uint64, uint64, bytes32)`.
pub fn decode_record(id: u64, data: &[u8]) -> Result<Record, RpcError> {
    let bad = |field: &str| RpcError::Parse(format!("getResume({id}): bad {field}"));
    let owner = word_to_address(&word(data, 0, "owner")?).ok_or_else(|| bad("owner"))?;
    let content_hash = Bytes32(word(data, 1, "resumeHash")?);
    let is_public = word_to_bool(&word(data, 2, "isPublic")?).ok_or_else(|| bad("isPublic"))?;
    let created_at = word_to_u64(&word(data, 3, "createdAt")?).ok_or_else(|| bad("createdAt"))?;
    let updated_at = word_to_u64(&word(data, 4, "updatedAt")?).ok_or_else(|| bad("updatedAt"))?;
    let caller_access = Handle(word(data, 5, "callerAccess")?);

    Ok(Record {
        id,
        owner,
        content_hash,
        is_public,
        created_at,
        updated_at,
        caller_access,
    })
}

/// `0x`-prefixed hex of `bytes`.
pub fn hex_data(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decodes `0x`-prefixed hex data.
pub fn parse_hex_data(raw: &str) -> Result<Vec<u8>, RpcError> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    hex::decode(digits).map_err(|e| RpcError::Parse(format!("invalid hex data: {e}")))
}

/// Decodes a `0x`-prefixed hex quantity.
pub fn parse_quantity(raw: &str) -> Result<u64, RpcError> {
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| RpcError::Parse(format!("invalid quantity: {raw}")))?;
    u64::from_str_radix(digits, 16).map_err(|_| RpcError::Parse(format!("invalid quantity: {raw}")))
}

/// `eth_getTransactionReceipt` result.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcReceipt {
    /// Transaction hash.
    pub transaction_hash: Bytes32,
    /// Inclusion block, hex quantity.
    #[serde(default)]
    pub block_number: Option<String>,
    /// `0x1` success, `0x0` failure; absent on pre-Byzantium chains.
    #[serde(default)]
    pub status: Option<String>,
    /// Emitted logs.
    #[serde(default)]
    pub logs: Vec<RpcLog>,
}

/// One receipt log.
#[derive(Debug, Deserialize)]
pub struct RpcLog {
    /// Emitting contract.
    pub address: Address,
    /// Indexed topics.
    pub topics: Vec<Bytes32>,
    /// Non-indexed data, hex.
    pub data: String,
}

impl RpcReceipt {
    /// Returns false when the node reports a failed execution.
    pub fn succeeded(&self) -> bool {
        !matches!(self.status.as_deref(), Some("0x0"))
    }

    /// Converts into the shared receipt type.
    pub fn into_receipt(self) -> Result<Receipt, RpcError> {
        let block_number = self.block_number.as_deref().map(parse_quantity).transpose()?;
        let logs = self
            .logs
            .into_iter()
            .map(|log| {
                Ok(LogEntry {
                    address: log.address,
                    topics: log.topics,
                    data: parse_hex_data(&log.data)?,
                })
            })
            .collect::<Result<Vec<_>, RpcError>>()?;

        Ok(Receipt {
            tx_hash: self.transaction_hash,
            block_number,
            logs,
        })
    }
}
