//! In-process secp256k1 signer.
//!
//! Signs the EIP-712 digest with a private key held in memory. Used for
//! headless clients and tests; browser wallets sign through their own
//! adapter.

use async_trait::async_trait;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use shared_types::{keccak256, Address, Bytes32, SignerError, TypedDataPayload, TypedDataSigner};
use std::fmt;
use zeroize::Zeroize;

use crate::eip712::signing_digest;

/// Holds a secp256k1 key and signs typed data with it.
#[derive(Clone)]
pub struct LocalSigner {
    key: SigningKey,
    address: Address,
}

impl fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl LocalSigner {
    /// Signer for a 32-byte private key.
    pub fn from_bytes(secret: &[u8; 32]) -> Result<Self, SignerError> {
        let key = SigningKey::from_slice(secret)
            .map_err(|_| SignerError::Unavailable("invalid private key".to_string()))?;
        let address = address_from_verifying_key(key.verifying_key());
        Ok(Self { key, address })
    }

    /// Signer for a hex private key, with or without `0x`.
    pub fn from_hex(secret: &str) -> Result<Self, SignerError> {
        let digits = secret.trim().trim_start_matches("0x");
        let mut bytes = hex::decode(digits)
            .map_err(|_| SignerError::Unavailable("private key is not hex".to_string()))?;
        let result = <[u8; 32]>::try_from(bytes.as_slice())
            .map_err(|_| SignerError::Unavailable("private key must be 32 bytes".to_string()))
            .and_then(|mut secret| {
                let signer = Self::from_bytes(&secret);
                secret.zeroize();
                signer
            });
        bytes.zeroize();
        result
    }

    /// Signer for a fresh random key.
    pub fn random() -> Self {
        let key = SigningKey::random(&mut rand::thread_rng());
        let address = address_from_verifying_key(key.verifying_key());
        Self { key, address }
    }

    /// Account address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Recoverable signature `r ‖ s ‖ v` over a 32-byte digest, `v ∈ {27, 28}`.
    pub fn sign_digest(&self, digest: &Bytes32) -> Result<[u8; 65], SignerError> {
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&digest.0)
            .map_err(|e| SignerError::Rejected(e.to_string()))?;

        let mut out = [0u8; 65];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = recovery_id.to_byte() + 27;
        Ok(out)
    }
}

#[async_trait]
impl TypedDataSigner for LocalSigner {
    async fn address(&self) -> Result<Address, SignerError> {
        Ok(self.address)
    }

    async fn sign_typed_data(&self, payload: &TypedDataPayload) -> Result<String, SignerError> {
        let digest =
            signing_digest(payload).map_err(|e| SignerError::Rejected(e.to_string()))?;
        let signature = self.sign_digest(&digest)?;
        Ok(format!("0x{}", hex::encode(signature)))
    }
}

/// Ethereum address of a public key: last 20 bytes of the keccak of the
/// uncompressed point without its `0x04` prefix.
pub fn address_from_verifying_key(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash.0[12..]);
    Address::new(address)
}

/// Address that produced a 65-byte `r ‖ s ‖ v` signature over `digest`.
pub fn recover_signer(digest: &Bytes32, signature: &[u8]) -> Option<Address> {
    if signature.len() != 65 {
        return None;
    }
    let v = match signature[64] {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return None,
    };
    let recovery_id = RecoveryId::try_from(v).ok()?;
    let signature = Signature::from_slice(&signature[..64]).ok()?;
    let key = VerifyingKey::recover_from_prehash(&digest.0, &signature, recovery_id).ok()?;
    Some(address_from_verifying_key(&key))
}
