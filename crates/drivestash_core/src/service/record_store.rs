//! Record store use-case service.
//!
//! # Responsibility
//! - Map logical record keys onto namespaced storage keys.
//! - Validate writes before they reach the backend.
//!
//! # Invariants
//! - Every storage key has the form `<namespace>:<key>`.
//! - `save` never removes fields that the new call does not list.
//! - `fetch` reports a hash with zero fields as absent.

use crate::model::record::{
    namespaced_key, validate_fields, RecordFields, RecordValidationError, DEFAULT_KEY_NAMESPACE,
};
use crate::repo::kv_backend::{KvBackend, StoreResult};
use log::{error, info};
use std::time::Instant;

/// Saves and fetches flat records through an injected backend.
pub struct RecordStore<B: KvBackend> {
    backend: B,
    namespace: String,
}

impl<B: KvBackend> RecordStore<B> {
    /// Creates a store using the default `record` namespace.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            namespace: DEFAULT_KEY_NAMESPACE.to_string(),
        }
    }

    /// Creates a store writing under a custom key namespace.
    ///
    /// # Errors
    /// - `RecordValidationError::EmptyNamespace` for a blank namespace.
    pub fn with_namespace(
        backend: B,
        namespace: impl Into<String>,
    ) -> Result<Self, RecordValidationError> {
        let namespace = namespace.into().trim().to_string();
        if namespace.is_empty() {
            return Err(RecordValidationError::EmptyNamespace);
        }
        Ok(Self { backend, namespace })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Storage key used for logical record `key`.
    pub fn storage_key(&self, key: &str) -> Result<String, RecordValidationError> {
        namespaced_key(&self.namespace, key)
    }

    /// Writes `fields` under `key` as an additive upsert.
    ///
    /// # Errors
    /// - `StoreError::Validation` for an empty key or an empty field set.
    /// - Backend errors are returned unchanged.
    pub fn save(&self, key: &str, fields: &RecordFields) -> StoreResult<()> {
        let storage_key = self.storage_key(key)?;
        validate_fields(fields)?;

        let started_at = Instant::now();
        match self.backend.set_fields(&storage_key, fields) {
            Ok(()) => {
                info!(
                    "event=record_save module=service status=ok key={} fields={} duration_ms={}",
                    storage_key,
                    fields.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=record_save module=service status=error key={} duration_ms={} error={}",
                    storage_key,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Reads every field stored under `key`.
    ///
    /// Returns `Ok(None)` when the store holds no fields for the key.
    pub fn fetch(&self, key: &str) -> StoreResult<Option<RecordFields>> {
        let storage_key = self.storage_key(key)?;

        let started_at = Instant::now();
        match self.backend.get_all_fields(&storage_key) {
            Ok(fields) => {
                info!(
                    "event=record_fetch module=service status=ok key={} found={} duration_ms={}",
                    storage_key,
                    !fields.is_empty(),
                    started_at.elapsed().as_millis()
                );
                Ok(if fields.is_empty() { None } else { Some(fields) })
            }
            Err(err) => {
                error!(
                    "event=record_fetch module=service status=error key={} duration_ms={} error={}",
                    storage_key,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
