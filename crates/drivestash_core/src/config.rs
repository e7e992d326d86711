//! Demo configuration with hard-coded defaults.
//!
//! # Invariants
//! - Defaults are valid; `AppConfig::default().validate()` always succeeds.
//! - The only override surface is the CLI; there is no config file.

use crate::model::record::{record_fields, RecordFields, DEFAULT_KEY_NAMESPACE};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_DRIVE_LABEL: &str = "BLUE 2TB TOSHIBA EXT";
pub const DEFAULT_STORE_URL: &str = "redis://127.0.0.1:6379/";
pub const DEFAULT_RECORD_ID: &str = "101";

const SUPPORTED_URL_SCHEMES: [&str; 4] = ["redis://", "rediss://", "redis+unix://", "unix://"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyValue(&'static str),
    UnsupportedStoreUrl(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue(name) => write!(f, "configuration value `{name}` cannot be empty"),
            Self::UnsupportedStoreUrl(url) => write!(
                f,
                "unsupported store url `{url}`; expected redis://, rediss://, redis+unix:// or unix://"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Settings for one demo run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Volume label to search for.
    pub drive_label: String,
    /// Key-value store endpoint.
    pub store_url: String,
    /// Prefix for storage keys.
    pub key_namespace: String,
    /// Logical key of the sample record.
    pub record_id: String,
    /// Fields written during the round trip.
    pub sample_fields: RecordFields,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            drive_label: DEFAULT_DRIVE_LABEL.to_string(),
            store_url: DEFAULT_STORE_URL.to_string(),
            key_namespace: DEFAULT_KEY_NAMESPACE.to_string(),
            record_id: DEFAULT_RECORD_ID.to_string(),
            sample_fields: record_fields([("name", "Alice"), ("email", "alice@example.com")]),
        }
    }
}

impl AppConfig {
    /// Checks that every value is usable before any I/O happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("drive_label", &self.drive_label),
            ("store_url", &self.store_url),
            ("key_namespace", &self.key_namespace),
            ("record_id", &self.record_id),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyValue(name));
            }
        }
        if self.sample_fields.is_empty() {
            return Err(ConfigError::EmptyValue("sample_fields"));
        }

        let url = self.store_url.trim();
        if !SUPPORTED_URL_SCHEMES
            .iter()
            .any(|scheme| url.to_ascii_lowercase().starts_with(scheme))
        {
            return Err(ConfigError::UnsupportedStoreUrl(url.to_string()));
        }
        Ok(())
    }
}
