//! # ABI Words
//!
//! Minimal Solidity ABI support for the static types the ResumeChain
//! contract uses (`uint256`, `uint64`, `address`, `bool`, `bytes32`).
//! Every value occupies one 32-byte word; there are no dynamic types on
//! this contract's surface.

use crate::entities::{Address, Bytes32, U256};
use crate::hashing::keccak256;

/// One 32-byte ABI word.
pub type Word = [u8; 32];

/// A static ABI value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// `uint256` (also used for `uint64`).
    Uint(U256),
    /// `address`.
    Address(Address),
    /// `bool`.
    Bool(bool),
    /// `bytes32`.
    Bytes32(Bytes32),
}

impl Token {
    /// Left-padded word encoding.
    #[must_use]
    pub fn to_word(&self) -> Word {
        match self {
            Token::Uint(v) => u256_word(*v),
            Token::Address(a) => address_word(a),
            Token::Bool(b) => bool_word(*b),
            Token::Bytes32(b) => b.0,
        }
    }
}

/// First four bytes of the keccak of a function signature.
#[must_use]
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash.0[0], hash.0[1], hash.0[2], hash.0[3]]
}

/// Encodes `selector ++ args` calldata.
#[must_use]
pub fn encode_call(signature: &str, args: &[Token]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + 32 * args.len());
    data.extend_from_slice(&selector(signature));
    for arg in args {
        data.extend_from_slice(&arg.to_word());
    }
    data
}

/// The `index`-th word of `data`, if present.
#[must_use]
pub fn word_at(data: &[u8], index: usize) -> Option<Word> {
    let start = index.checked_mul(32)?;
    let slice = data.get(start..start + 32)?;
    <Word>::try_from(slice).ok()
}

/// Word as `u64`; None if the value does not fit.
#[must_use]
pub fn word_to_u64(word: &Word) -> Option<u64> {
    if word[..24].iter().any(|b| *b != 0) {
        return None;
    }
    let mut tail = [0u8; 8];
    tail.copy_from_slice(&word[24..]);
    Some(u64::from_be_bytes(tail))
}

/// Word as an address; None if the upper 12 bytes are not zero.
#[must_use]
pub fn word_to_address(word: &Word) -> Option<Address> {
    if word[..12].iter().any(|b| *b != 0) {
        return None;
    }
    Address::from_slice(&word[12..])
}

/// Word as a bool; None unless the value is 0 or 1.
#[must_use]
pub fn word_to_bool(word: &Word) -> Option<bool> {
    match word_to_u64(word) {
        Some(0) => Some(false),
        Some(1) => Some(true),
        _ => None,
    }
}

/// Big-endian word of an unsigned integer.
#[must_use]
pub fn u256_word(value: U256) -> Word {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

/// Word of a `u64`.
#[must_use]
pub fn u64_word(value: u64) -> Word {
    u256_word(U256::from(value))
}

/// Left-padded word of an address.
#[must_use]
pub fn address_word(address: &Address) -> Word {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// Word of a bool.
#[must_use]
pub fn bool_word(value: bool) -> Word {
    let mut word = [0u8; 32];
    word[31] = u8::from(value);
    word
}
