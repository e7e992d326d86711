//! Backend contract and store error type.

use crate::model::record::{RecordFields, RecordValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures from record store operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(RecordValidationError),
    Redis(redis::RedisError),
    ConnectionPoisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Redis(err) => write!(f, "key-value store error: {err}"),
            Self::ConnectionPoisoned => {
                write!(f, "key-value store connection is unusable after a panic")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Redis(err) => Some(err),
            Self::ConnectionPoisoned => None,
        }
    }
}

impl From<RecordValidationError> for StoreError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<redis::RedisError> for StoreError {
    fn from(value: redis::RedisError) -> Self {
        Self::Redis(value)
    }
}

/// Hash-oriented key-value verbs.
pub trait KvBackend {
    /// Creates or updates the listed fields under `key`.
    fn set_fields(&self, key: &str, fields: &RecordFields) -> StoreResult<()>;

    /// Reads every field under `key`; empty when the key does not exist.
    fn get_all_fields(&self, key: &str) -> StoreResult<RecordFields>;
}

impl<B: KvBackend + ?Sized> KvBackend for &B {
    fn set_fields(&self, key: &str, fields: &RecordFields) -> StoreResult<()> {
        (**self).set_fields(key, fields)
    }

    fn get_all_fields(&self, key: &str) -> StoreResult<RecordFields> {
        (**self).get_all_fields(key)
    }
}

impl<B: KvBackend + ?Sized> KvBackend for Box<B> {
    fn set_fields(&self, key: &str, fields: &RecordFields) -> StoreResult<()> {
        (**self).set_fields(key, fields)
    }

    fn get_all_fields(&self, key: &str) -> StoreResult<RecordFields> {
        (**self).get_all_fields(key)
    }
}
