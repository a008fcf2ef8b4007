//! # Core Domain Entities
//!
//! Defines the value objects and ledger records of the ResumeChain client.
//!
//! ## Clusters
//!
//! - **Primitives**: `Address`, `Bytes32`, `Handle`, `U256`
//! - **Ledger**: `Record`, `Section`, `Receipt`, `LogEntry`

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseError;

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

fn strip_hex_prefix(s: &str) -> Option<&str> {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
}

fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], ParseError> {
    let trimmed = s.trim();
    let digits = strip_hex_prefix(trimmed).unwrap_or(trimmed);
    if digits.len() != N * 2 {
        return Err(ParseError::InvalidLength {
            expected_bytes: N,
            hex_digits: digits.len(),
        });
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(digits, &mut out).map_err(|_| ParseError::InvalidHex(s.to_string()))?;
    Ok(out)
}

/// Parses the big-integer forms a handle may take at the API boundary:
/// `0x`-prefixed hex of at most 64 digits, or a decimal integer.
///
/// `"0x"` alone parses to zero.
pub fn parse_big_uint(s: &str) -> Result<U256, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }
    if let Some(digits) = strip_hex_prefix(s) {
        if digits.is_empty() {
            return Ok(U256::zero());
        }
        if digits.len() > 64 {
            return Err(ParseError::Overflow(s.to_string()));
        }
        return U256::from_str_radix(digits, 16).map_err(|_| ParseError::InvalidHex(s.to_string()));
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidInteger(s.to_string()));
    }
    U256::from_dec_str(s).map_err(|_| ParseError::Overflow(s.to_string()))
}

macro_rules! impl_hex_string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }
    };
}

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte account or contract address.
///
/// Parsing is case-insensitive, so equality of two parsed addresses is the
/// case-insensitive comparison the scanner relies on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 20]>::try_from(slice).ok().map(Self)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Lowercase `0x`-prefixed hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed::<20>(s).map(Self)
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl_hex_string_serde!(Address);

// =============================================================================
// BYTES32 (digests, transaction hashes)
// =============================================================================

/// A 32-byte digest: content hashes, section hashes, transaction hashes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Bytes32(pub [u8; 32]);

impl Bytes32 {
    /// The zero value.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates a value from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a value from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 32]>::try_from(slice).ok().map(Self)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns true if all bytes are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Lowercase `0x`-prefixed hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for Bytes32 {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed::<32>(s).map(Self)
    }
}

impl From<[u8; 32]> for Bytes32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl_hex_string_serde!(Bytes32);

// =============================================================================
// HANDLE (encrypted value reference)
// =============================================================================

/// Opaque 32-byte reference to an encrypted value held by the encryption
/// backend. Not secret; only an authorized party can resolve it.
///
/// The all-zero handle is the null sentinel: "no value".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Handle(pub [u8; 32]);

impl Handle {
    /// The null handle.
    pub const NULL: Self = Self([0u8; 32]);

    /// Parses any big-integer form accepted by [`parse_big_uint`].
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        parse_big_uint(s).map(Self::from_u256)
    }

    /// Builds a handle from its integer value.
    #[must_use]
    pub fn from_u256(value: U256) -> Self {
        let mut bytes = [0u8; 32];
        value.to_big_endian(&mut bytes);
        Self(bytes)
    }

    /// Integer value of the handle.
    #[must_use]
    pub fn to_u256(&self) -> U256 {
        U256::from_big_endian(&self.0)
    }

    /// Returns true for the null sentinel.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Canonical form: `0x` followed by exactly 64 lowercase hex digits.
    #[must_use]
    pub fn canonical_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    fn to_hex(&self) -> String {
        self.canonical_hex()
    }
}

impl FromStr for Handle {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Bytes32> for Handle {
    fn from(value: Bytes32) -> Self {
        Self(value.0)
    }
}

impl_hex_string_serde!(Handle);

// =============================================================================
// LEDGER RECORDS
// =============================================================================

/// One resume entry as read from the ledger.
///
/// Snapshot only: the client never mutates a record; writes go through the
/// write façade and show up on the next read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Sequential, 1-based, never reused.
    pub id: u64,
    /// Owning account.
    pub owner: Address,
    /// Digest of the off-chain resume document.
    pub content_hash: Bytes32,
    /// Visible in public listings.
    pub is_public: bool,
    /// Unix timestamp of creation.
    pub created_at: u64,
    /// Unix timestamp of last update.
    pub updated_at: u64,
    /// Encrypted "caller has access" flag, scoped to the account that read it.
    pub caller_access: Handle,
}

impl Record {
    /// Returns true if `account` owns this record.
    #[must_use]
    pub fn is_owned_by(&self, account: &Address) -> bool {
        self.owner == *account
    }
}

/// A resume section and its encrypted endorsement counter.
///
/// Keyed by `(resume_id, section_hash)`; the ledger keeps the last write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Parent resume id.
    pub resume_id: u64,
    /// Digest identifying the section.
    pub section_hash: Bytes32,
    /// Encrypted endorsement count.
    pub encrypted_endorsement_count: Handle,
}

/// A log emitted by a confirmed transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Emitting contract.
    pub address: Address,
    /// Indexed topics; topic 0 is the event signature hash.
    pub topics: Vec<Bytes32>,
    /// ABI-encoded non-indexed fields.
    pub data: Vec<u8>,
}

/// Confirmation of a submitted transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Transaction hash.
    pub tx_hash: Bytes32,
    /// Block that included the transaction.
    pub block_number: Option<u64>,
    /// Emitted logs, in order.
    pub logs: Vec<LogEntry>,
}
