use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::domain::ContinuityError;
use crate::ports::ContinuityStore;

/// In-memory continuity store.
#[derive(Debug, Default)]
pub struct MemoryContinuityStore {
    data: RwLock<BTreeMap<String, String>>,
}

impl MemoryContinuityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl ContinuityStore for MemoryContinuityStore {
    fn get(&self, key: &str) -> Result<Option<String>, ContinuityError> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ContinuityError> {
        self.data.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ContinuityError> {
        self.data.write().remove(key);
        Ok(())
    }
}
