//! Keccak-256, the digest used for ABI selectors, event topics, EIP-712
//! hashing and resume content hashes.

use sha3::{Digest, Keccak256};

use crate::entities::Bytes32;

/// Keccak-256 of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> Bytes32 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    Bytes32(hasher.finalize().into())
}
