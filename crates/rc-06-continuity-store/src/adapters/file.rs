use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::ContinuityError;
use crate::ports::ContinuityStore;

/// Continuity store persisted as a flat JSON object.
///
/// The whole map is rewritten on every change, through a temp file and a
/// rename so a crash never leaves a half-written file behind.
pub struct FileContinuityStore {
    data: Mutex<BTreeMap<String, String>>,
    path: PathBuf,
}

impl FileContinuityStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ContinuityError> {
        let path = path.as_ref().to_path_buf();
        let data = match std::fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => {
                let data: BTreeMap<String, String> = serde_json::from_slice(&bytes)
                    .map_err(|e| ContinuityError::Corrupt {
                        message: e.to_string(),
                    })?;
                info!(
                    "[rc-06] Loaded {} continuity keys from {}",
                    data.len(),
                    path.display()
                );
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("[rc-06] No continuity file at {}", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            data: Mutex::new(data),
            path,
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, data: &BTreeMap<String, String>) -> Result<(), ContinuityError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(data).map_err(|e| ContinuityError::Io {
            message: e.to_string(),
        })?;

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, bytes)?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl ContinuityStore for FileContinuityStore {
    fn get(&self, key: &str) -> Result<Option<String>, ContinuityError> {
        Ok(self.data.lock().get(key).cloned())
    }

    // Memory only changes once the file write went through.
    fn set(&self, key: &str, value: &str) -> Result<(), ContinuityError> {
        let mut data = self.data.lock();
        let mut next = data.clone();
        next.insert(key.to_string(), value.to_string());
        self.save(&next)?;
        *data = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ContinuityError> {
        let mut data = self.data.lock();
        if !data.contains_key(key) {
            return Ok(());
        }
        let mut next = data.clone();
        next.remove(key);
        self.save(&next)?;
        *data = next;
        Ok(())
    }
}
