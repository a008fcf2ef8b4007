//! # Decrypt Pipeline Service

use parking_lot::RwLock;
use shared_types::{
    Address, Handle, HandleContractPair, SessionSource, TypedDataSigner, UserDecryptCall,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use crate::config::DecryptConfig;
use crate::domain::{ClearValue, DecryptError, DecryptResponse, DecryptedValues, RequestedHandle};

/// Source of the current unix time in seconds.
pub type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

fn system_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Batched, authorized decryption of handles.
pub struct DecryptPipeline {
    sessions: Arc<dyn SessionSource>,
    signer: RwLock<Option<Arc<dyn TypedDataSigner>>>,
    config: DecryptConfig,
    clock: Clock,
}

impl DecryptPipeline {
    /// Create a pipeline reading sessions from `sessions`, with no signer.
    pub fn new(sessions: Arc<dyn SessionSource>, config: DecryptConfig) -> Self {
        Self {
            sessions,
            signer: RwLock::new(None),
            config,
            clock: Arc::new(system_clock),
        }
    }

    /// Builder: attach a signer.
    pub fn with_signer(self, signer: Arc<dyn TypedDataSigner>) -> Self {
        *self.signer.write() = Some(signer);
        self
    }

    /// Builder: replace the clock.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Connects or disconnects the wallet.
    pub fn set_signer(&self, signer: Option<Arc<dyn TypedDataSigner>>) {
        *self.signer.write() = signer;
    }

    /// Resolves `handles` to cleartext values, keyed by the strings given.
    ///
    /// Returns an empty map when no session or signer is available, or when
    /// nothing but null handles was requested.
    pub async fn decrypt(
        &self,
        contract: Address,
        handles: &[String],
    ) -> Result<DecryptedValues, DecryptError> {
        if handles.is_empty() {
            return Ok(DecryptedValues::new());
        }
        let Some(session) = self.sessions.current_session() else {
            debug!("[rc-03] No ready session, skipping decrypt of {} handles", handles.len());
            return Ok(DecryptedValues::new());
        };
        let Some(signer) = self.signer.read().clone() else {
            debug!("[rc-03] No signer connected, skipping decrypt");
            return Ok(DecryptedValues::new());
        };

        let requested = filter_handles(handles);
        if requested.is_empty() {
            return Ok(DecryptedValues::new());
        }

        let keypair = session.generate_keypair()?;
        let start_timestamp = (self.clock)();
        let duration_days = self.config.duration_days;
        let scopes = vec![contract];
        let payload = session.build_authorization(
            &keypair.public_key,
            &scopes,
            start_timestamp,
            duration_days,
        )?;

        let signature = signer.sign_typed_data(&payload).await?;
        let user_address = signer.address().await?;

        let call = UserDecryptCall {
            requests: requested
                .iter()
                .map(|entry| HandleContractPair {
                    handle: entry.original.clone(),
                    contract_address: contract,
                })
                .collect(),
            keypair,
            signature,
            contract_addresses: scopes,
            user_address,
            start_timestamp,
            duration_days,
        };
        let response = session.user_decrypt(call).await?;

        let values = DecryptResponse::classify(response).normalize(&requested);
        info!(
            "[rc-03] Decrypted {}/{} handles for {}",
            values.len(),
            requested.len(),
            user_address
        );
        Ok(values)
    }

    /// Decrypts one boolean handle, such as a record's access flag.
    ///
    /// `None` when the handle is null, nothing could be decrypted, or the
    /// value is not boolean-like.
    pub async fn decrypt_bool(
        &self,
        contract: Address,
        handle: &str,
    ) -> Result<Option<bool>, DecryptError> {
        let values = self.decrypt(contract, &[handle.to_string()]).await?;
        Ok(values.get(handle).and_then(ClearValue::as_bool))
    }
}

/// Drops empty strings, null handles, unparseable strings and duplicates.
fn filter_handles(handles: &[String]) -> Vec<RequestedHandle> {
    let mut seen = HashSet::new();
    let mut requested = Vec::with_capacity(handles.len());
    for raw in handles {
        if raw.is_empty() || !seen.insert(raw.as_str()) {
            continue;
        }
        match Handle::parse(raw) {
            Ok(handle) if handle.is_null() => {}
            Ok(handle) => requested.push(RequestedHandle {
                original: raw.clone(),
                handle,
            }),
            Err(e) => warn!("[rc-03] Skipping unparseable handle {:?}: {}", raw, e),
        }
    }
    requested
}
