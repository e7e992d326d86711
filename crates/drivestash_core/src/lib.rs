//! Core logic for drivestash.
//! Resolves removable volumes by label and round-trips flat records through
//! a key-value store.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod volume;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{record_fields, RecordFields, RecordValidationError};
pub use model::volume::{canonical_identifier, Volume};
pub use repo::kv_backend::{KvBackend, StoreError, StoreResult};
pub use repo::memory_backend::InMemoryBackend;
pub use repo::redis_backend::RedisBackend;
pub use service::demo::{run_demo, DemoError, DemoReport, DemoResult};
pub use service::record_store::RecordStore;
pub use volume::{SystemVolumeSource, VolumeError, VolumeResolver, VolumeResult, VolumeSource};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
