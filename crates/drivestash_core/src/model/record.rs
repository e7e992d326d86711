//! Flat string record model.
//!
//! # Responsibility
//! - Define the field map persisted under one record key.
//! - Validate caller input before any store round trip.
//!
//! # Invariants
//! - Keys are opaque; only the empty key is rejected.
//! - A write carries at least one field; any field names are legal.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field name to field value mapping for one record.
///
/// Ordered so that console output and comparisons are deterministic.
pub type RecordFields = BTreeMap<String, String>;

/// Default namespace prepended to every record key.
pub const DEFAULT_KEY_NAMESPACE: &str = "record";

/// Validation failures for record keys and field sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    EmptyKey,
    EmptyNamespace,
    NoFields,
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "record key cannot be empty"),
            Self::EmptyNamespace => write!(f, "record key namespace cannot be empty"),
            Self::NoFields => write!(f, "record must contain at least one field"),
        }
    }
}

impl Error for RecordValidationError {}

/// Composes the storage key `<namespace>:<key>`.
pub fn namespaced_key(namespace: &str, key: &str) -> Result<String, RecordValidationError> {
    let namespace = namespace.trim();
    if namespace.is_empty() {
        return Err(RecordValidationError::EmptyNamespace);
    }
    validate_key(key)?;
    Ok(format!("{namespace}:{key}"))
}

pub fn validate_key(key: &str) -> Result<(), RecordValidationError> {
    if key.is_empty() {
        return Err(RecordValidationError::EmptyKey);
    }
    Ok(())
}

pub fn validate_fields(fields: &RecordFields) -> Result<(), RecordValidationError> {
    if fields.is_empty() {
        return Err(RecordValidationError::NoFields);
    }
    Ok(())
}

/// Builds a field map from `(name, value)` pairs.
pub fn record_fields<N, V>(pairs: impl IntoIterator<Item = (N, V)>) -> RecordFields
where
    N: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}
