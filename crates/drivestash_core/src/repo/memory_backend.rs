//! Process-local backend with the same hash semantics as Redis.

use super::kv_backend::{KvBackend, StoreError, StoreResult};
use crate::model::record::RecordFields;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// In-memory hash store, used offline and in tests.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    hashes: Mutex<HashMap<String, RecordFields>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently holding at least one field.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, HashMap<String, RecordFields>>> {
        self.hashes
            .lock()
            .map_err(|_| StoreError::ConnectionPoisoned)
    }
}

impl KvBackend for InMemoryBackend {
    fn set_fields(&self, key: &str, fields: &RecordFields) -> StoreResult<()> {
        let mut hashes = self.lock()?;
        let entry = hashes.entry(key.to_string()).or_default();
        for (name, value) in fields {
            entry.insert(name.clone(), value.clone());
        }
        Ok(())
    }

    fn get_all_fields(&self, key: &str) -> StoreResult<RecordFields> {
        let hashes = self.lock()?;
        Ok(hashes.get(key).cloned().unwrap_or_default())
    }
}
