//! # Continuity Service
//!
//! Typed access to the key schema on top of any [`ContinuityStore`].

use shared_types::Address;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    cid_by_id_key, file_by_id_key, ContinuityError, LastResume, CONNECTED_KEY, CONTRACT_KEY,
    DEPLOYMENT_SCOPED_KEYS, LAST_FILE_CID_KEY, LAST_ID_KEY, LAST_JSON_CID_KEY, LAST_NAME_KEY,
    LAST_TITLE_KEY,
};
use crate::ports::ContinuityStore;

/// Client continuity state.
#[derive(Clone)]
pub struct Continuity {
    store: Arc<dyn ContinuityStore>,
}

impl Continuity {
    /// Wraps a store.
    pub fn new(store: Arc<dyn ContinuityStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn ContinuityStore> {
        &self.store
    }

    /// Records a successful wallet connection.
    pub fn mark_connected(&self) -> Result<(), ContinuityError> {
        self.store.set(CONNECTED_KEY, "1")
    }

    /// True if a wallet connected in an earlier run.
    pub fn was_connected(&self) -> Result<bool, ContinuityError> {
        Ok(self.store.get(CONNECTED_KEY)?.as_deref() == Some("1"))
    }

    /// Remembers the current contract address.
    ///
    /// Returns true when the address differs (ignoring case) from the stored
    /// one and the last-resume keys were therefore cleared.
    pub fn note_contract(&self, contract: &Address) -> Result<bool, ContinuityError> {
        let changed = match self.store.get(CONTRACT_KEY)? {
            Some(prev) => match prev.parse::<Address>() {
                Ok(prev) => prev != *contract,
                Err(_) => !prev.eq_ignore_ascii_case(&contract.to_hex()),
            },
            None => false,
        };
        if changed {
            info!("[rc-06] Contract changed to {}, clearing last resume", contract);
            for key in DEPLOYMENT_SCOPED_KEYS {
                self.store.remove(key)?;
            }
        }
        self.store.set(CONTRACT_KEY, &contract.to_hex())?;
        Ok(changed)
    }

    /// Remembers the last created resume.
    pub fn remember_created(&self, resume: &LastResume) -> Result<(), ContinuityError> {
        self.store.set(LAST_ID_KEY, &resume.id.to_string())?;
        self.store.set(LAST_NAME_KEY, &resume.name)?;
        self.store.set(LAST_TITLE_KEY, &resume.title)
    }

    /// The last created resume, if one is recorded.
    pub fn last_resume(&self) -> Result<Option<LastResume>, ContinuityError> {
        let Some(raw_id) = self.store.get(LAST_ID_KEY)? else {
            return Ok(None);
        };
        let id = match raw_id.trim().parse::<u64>() {
            Ok(id) if id > 0 => id,
            _ => {
                warn!("[rc-06] Ignoring unusable last resume id {:?}", raw_id);
                return Ok(None);
            }
        };
        Ok(Some(LastResume {
            id,
            name: self.store.get(LAST_NAME_KEY)?.unwrap_or_default(),
            title: self.store.get(LAST_TITLE_KEY)?.unwrap_or_default(),
        }))
    }

    /// Records uploaded content ids, also under `resume_id` when known.
    pub fn remember_content(
        &self,
        resume_id: Option<u64>,
        json_cid: &str,
        file_cid: Option<&str>,
    ) -> Result<(), ContinuityError> {
        self.store.set(LAST_JSON_CID_KEY, json_cid)?;
        if let Some(file_cid) = file_cid {
            self.store.set(LAST_FILE_CID_KEY, file_cid)?;
        }
        if let Some(id) = resume_id {
            self.store.set(&cid_by_id_key(id), json_cid)?;
            if let Some(file_cid) = file_cid {
                self.store.set(&file_by_id_key(id), file_cid)?;
            }
        }
        Ok(())
    }

    /// JSON content id of `resume_id`, falling back to the latest upload.
    pub fn json_cid_for(&self, resume_id: Option<u64>) -> Result<Option<String>, ContinuityError> {
        self.lookup_with_fallback(resume_id.map(cid_by_id_key), LAST_JSON_CID_KEY)
    }

    /// Attachment content id of `resume_id`, falling back to the latest upload.
    pub fn file_cid_for(&self, resume_id: Option<u64>) -> Result<Option<String>, ContinuityError> {
        self.lookup_with_fallback(resume_id.map(file_by_id_key), LAST_FILE_CID_KEY)
    }

    fn lookup_with_fallback(
        &self,
        key: Option<String>,
        fallback: &str,
    ) -> Result<Option<String>, ContinuityError> {
        if let Some(key) = key {
            if let Some(value) = self.store.get(&key)?.filter(|v| !v.is_empty()) {
                return Ok(Some(value));
            }
        }
        Ok(self.store.get(fallback)?.filter(|v| !v.is_empty()))
    }
}
