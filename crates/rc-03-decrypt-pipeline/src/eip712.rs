//! # EIP-712 Hashing
//!
//! Digest of the `UserDecryptRequestVerification` authorization, plus the
//! JSON rendering wallets expect for `eth_signTypedData_v4`.

use serde_json::{json, Value};
use shared_types::abi::{address_word, u64_word};
use shared_types::{keccak256, Address, Bytes32, Eip712Domain, TypedDataPayload, UserDecryptMessage};

use crate::domain::DecryptError;

/// Encoded type of the signing domain.
pub const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Encoded type of the authorization message.
pub const USER_DECRYPT_TYPE: &str = "UserDecryptRequestVerification(bytes publicKey,address[] contractAddresses,uint256 startTimestamp,uint256 durationDays)";

/// `hashStruct` of the domain.
pub fn domain_separator(domain: &Eip712Domain) -> Bytes32 {
    let mut encoded = Vec::with_capacity(32 * 5);
    encoded.extend_from_slice(&keccak256(EIP712_DOMAIN_TYPE.as_bytes()).0);
    encoded.extend_from_slice(&keccak256(domain.name.as_bytes()).0);
    encoded.extend_from_slice(&keccak256(domain.version.as_bytes()).0);
    encoded.extend_from_slice(&u64_word(domain.chain_id));
    encoded.extend_from_slice(&address_word(&domain.verifying_contract));
    keccak256(&encoded)
}

/// `hashStruct` of the message.
pub fn struct_hash(message: &UserDecryptMessage) -> Result<Bytes32, DecryptError> {
    let public_key = decode_hex_bytes(&message.public_key)?;

    let mut addresses = Vec::with_capacity(32 * message.contract_addresses.len());
    for address in &message.contract_addresses {
        addresses.extend_from_slice(&address_word(address));
    }

    let mut encoded = Vec::with_capacity(32 * 5);
    encoded.extend_from_slice(&keccak256(USER_DECRYPT_TYPE.as_bytes()).0);
    encoded.extend_from_slice(&keccak256(&public_key).0);
    encoded.extend_from_slice(&keccak256(&addresses).0);
    encoded.extend_from_slice(&u64_word(message.start_timestamp));
    encoded.extend_from_slice(&u64_word(message.duration_days));
    Ok(keccak256(&encoded))
}

/// `keccak256(0x1901 ‖ domainSeparator ‖ hashStruct(message))`.
pub fn signing_digest(payload: &TypedDataPayload) -> Result<Bytes32, DecryptError> {
    let mut encoded = Vec::with_capacity(66);
    encoded.extend_from_slice(&[0x19, 0x01]);
    encoded.extend_from_slice(&domain_separator(&payload.domain).0);
    encoded.extend_from_slice(&struct_hash(&payload.message)?.0);
    Ok(keccak256(&encoded))
}

/// The payload as an `eth_signTypedData_v4` JSON document.
pub fn typed_data_json(payload: &TypedDataPayload) -> Value {
    let contracts: Vec<String> = payload
        .message
        .contract_addresses
        .iter()
        .map(Address::to_hex)
        .collect();
    json!({
        "types": {
            "EIP712Domain": [
                { "name": "name", "type": "string" },
                { "name": "version", "type": "string" },
                { "name": "chainId", "type": "uint256" },
                { "name": "verifyingContract", "type": "address" },
            ],
            "UserDecryptRequestVerification": [
                { "name": "publicKey", "type": "bytes" },
                { "name": "contractAddresses", "type": "address[]" },
                { "name": "startTimestamp", "type": "uint256" },
                { "name": "durationDays", "type": "uint256" },
            ],
        },
        "primaryType": payload.primary_type,
        "domain": {
            "name": payload.domain.name,
            "version": payload.domain.version,
            "chainId": payload.domain.chain_id,
            "verifyingContract": payload.domain.verifying_contract.to_hex(),
        },
        "message": {
            "publicKey": payload.message.public_key,
            "contractAddresses": contracts,
            "startTimestamp": payload.message.start_timestamp.to_string(),
            "durationDays": payload.message.duration_days.to_string(),
        },
    })
}

fn decode_hex_bytes(raw: &str) -> Result<Vec<u8>, DecryptError> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    hex::decode(digits).map_err(|e| DecryptError::InvalidPayload(format!("publicKey: {e}")))
}
