//! # Encryption Session
//!
//! The "instance" produced by session bootstrap and consumed by the decrypt
//! pipeline, plus the typed-data payload the user signs to authorize a
//! decrypt batch.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::entities::Address;
use crate::errors::SessionError;

/// Primary type name of the decrypt authorization payload.
pub const USER_DECRYPT_PRIMARY_TYPE: &str = "UserDecryptRequestVerification";

/// One-time keypair used to re-encrypt decrypt results for the caller.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keypair {
    /// Hex-encoded public key.
    pub public_key: String,
    /// Hex-encoded private key.
    pub private_key: String,
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// EIP-712 domain of the authorization payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eip712Domain {
    /// Domain name.
    pub name: String,
    /// Domain version.
    pub version: String,
    /// Chain the signature is valid on.
    pub chain_id: u64,
    /// Verifying contract.
    pub verifying_contract: Address,
}

/// Message body of `UserDecryptRequestVerification`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDecryptMessage {
    /// Hex-encoded one-time public key.
    pub public_key: String,
    /// Contracts the authorization is scoped to.
    pub contract_addresses: Vec<Address>,
    /// Validity window start (unix seconds).
    pub start_timestamp: u64,
    /// Validity window length in days.
    pub duration_days: u64,
}

/// Typed-data payload to be signed by the user's wallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDataPayload {
    /// Signing domain.
    pub domain: Eip712Domain,
    /// Always [`USER_DECRYPT_PRIMARY_TYPE`].
    pub primary_type: String,
    /// Message body.
    pub message: UserDecryptMessage,
}

/// One entry of a batched decrypt request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleContractPair {
    /// Handle string as supplied by the caller.
    pub handle: String,
    /// Contract that owns the handle.
    pub contract_address: Address,
}

/// Arguments of a batched user decrypt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDecryptCall {
    /// Handles to resolve.
    pub requests: Vec<HandleContractPair>,
    /// One-time keypair.
    pub keypair: Keypair,
    /// `0x`-prefixed signature over the authorization payload.
    pub signature: String,
    /// Authorization scope.
    pub contract_addresses: Vec<Address>,
    /// Signing account.
    pub user_address: Address,
    /// Validity window start (unix seconds).
    pub start_timestamp: u64,
    /// Validity window length in days.
    pub duration_days: u64,
}

/// How a session was built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionKind {
    /// Full relayer SDK instance.
    Relayer,
    /// Metadata-driven mock for local networks.
    Mock,
}

/// Structural identity of a session, used to compare two sessions built
/// from the same inputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescriptor {
    /// Construction path.
    pub kind: SessionKind,
    /// Network the session is bound to.
    pub chain_id: u64,
    /// Relayer or RPC endpoint, if any.
    pub endpoint: Option<String>,
}

/// A live encryption session bound to one (provider, network) pair.
#[async_trait]
pub trait Session: Send + Sync + fmt::Debug {
    /// Structural identity.
    fn descriptor(&self) -> SessionDescriptor;

    /// Generates a fresh one-time keypair.
    fn generate_keypair(&self) -> Result<Keypair, SessionError>;

    /// Builds the authorization payload for a decrypt batch.
    fn build_authorization(
        &self,
        public_key: &str,
        contract_addresses: &[Address],
        start_timestamp: u64,
        duration_days: u64,
    ) -> Result<TypedDataPayload, SessionError>;

    /// Submits a batched decrypt.
    ///
    /// The response shape is backend-defined (object, list or scalar); the
    /// decrypt pipeline normalizes it.
    async fn user_decrypt(&self, call: UserDecryptCall) -> Result<serde_json::Value, SessionError>;
}

/// Read access to the currently published session, if any.
pub trait SessionSource: Send + Sync {
    /// The ready session, or None while bootstrapping or after failure.
    fn current_session(&self) -> Option<Arc<dyn Session>>;
}

impl SessionSource for Option<Arc<dyn Session>> {
    fn current_session(&self) -> Option<Arc<dyn Session>> {
        self.clone()
    }
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

#[derive(Debug, Default)]
struct MockSessionState {
    keypairs_issued: u64,
    calls: Vec<UserDecryptCall>,
    response: serde_json::Value,
    fail_decrypt: bool,
}

/// Session double used by bootstrap, decrypt and integration tests.
///
/// Issues distinct keypairs, records every decrypt call and answers with a
/// canned response.
#[derive(Debug)]
pub struct MockSession {
    descriptor: SessionDescriptor,
    verifying_contract: Address,
    state: Mutex<MockSessionState>,
}

impl MockSession {
    /// Create a session with the given identity and a `null` response.
    pub fn new(descriptor: SessionDescriptor) -> Self {
        Self {
            descriptor,
            verifying_contract: Address::new([0xdc; 20]),
            state: Mutex::new(MockSessionState::default()),
        }
    }

    /// Shorthand for a relayer session on `chain_id`.
    pub fn relayer(chain_id: u64) -> Self {
        Self::new(SessionDescriptor {
            kind: SessionKind::Relayer,
            chain_id,
            endpoint: None,
        })
    }

    /// Set the response returned by `user_decrypt`.
    pub fn set_response(&self, response: serde_json::Value) {
        self.state.lock().response = response;
    }

    /// Make `user_decrypt` fail.
    pub fn fail_decrypt(&self, fail: bool) {
        self.state.lock().fail_decrypt = fail;
    }

    /// Decrypt calls received so far.
    pub fn calls(&self) -> Vec<UserDecryptCall> {
        self.state.lock().calls.clone()
    }

    /// Number of keypairs issued.
    pub fn keypairs_issued(&self) -> u64 {
        self.state.lock().keypairs_issued
    }
}

#[async_trait]
impl Session for MockSession {
    fn descriptor(&self) -> SessionDescriptor {
        self.descriptor.clone()
    }

    fn generate_keypair(&self) -> Result<Keypair, SessionError> {
        let mut state = self.state.lock();
        state.keypairs_issued += 1;
        let n = state.keypairs_issued;
        Ok(Keypair {
            public_key: format!("0x{:064x}", n),
            private_key: format!("0x{:064x}", u64::MAX - n),
        })
    }

    fn build_authorization(
        &self,
        public_key: &str,
        contract_addresses: &[Address],
        start_timestamp: u64,
        duration_days: u64,
    ) -> Result<TypedDataPayload, SessionError> {
        Ok(TypedDataPayload {
            domain: Eip712Domain {
                name: "Decryption".to_string(),
                version: "1".to_string(),
                chain_id: self.descriptor.chain_id,
                verifying_contract: self.verifying_contract,
            },
            primary_type: USER_DECRYPT_PRIMARY_TYPE.to_string(),
            message: UserDecryptMessage {
                public_key: public_key.to_string(),
                contract_addresses: contract_addresses.to_vec(),
                start_timestamp,
                duration_days,
            },
        })
    }

    async fn user_decrypt(&self, call: UserDecryptCall) -> Result<serde_json::Value, SessionError> {
        let mut state = self.state.lock();
        state.calls.push(call);
        if state.fail_decrypt {
            return Err(SessionError::Decrypt("mock relayer unavailable".to_string()));
        }
        Ok(state.response.clone())
    }
}
