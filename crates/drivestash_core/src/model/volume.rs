//! Volume snapshot model.
//!
//! # Invariants
//! - `identifier` is only meaningful while the device stays mounted.
//! - Identifier comparison is case-insensitive on canonical root form.

use serde::{Deserialize, Serialize};

/// One mounted volume as reported by the operating system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    /// Root path of the volume, e.g. `E:\` or `/media/backup`.
    pub identifier: String,
    /// Human-assigned volume label. Empty when the volume has none.
    pub label: String,
    /// Whether the volume can currently be queried.
    pub ready: bool,
}

impl Volume {
    pub fn new(identifier: impl Into<String>, label: impl Into<String>, ready: bool) -> Self {
        Self {
            identifier: identifier.into(),
            label: label.into(),
            ready,
        }
    }

    /// Returns the identifier in canonical root form.
    pub fn canonical_identifier(&self) -> String {
        canonical_identifier(&self.identifier)
    }

    /// Case-insensitive label match.
    pub fn label_matches(&self, label: &str) -> bool {
        self.label.to_lowercase() == label.to_lowercase()
    }

    /// Case-insensitive match against an identifier in any accepted form.
    pub fn identifier_matches(&self, identifier: &str) -> bool {
        same_identifier(&self.identifier, identifier)
    }
}

/// Normalizes a drive identifier into canonical root form.
///
/// - `e`, `E`, `e:` and `E:\` all become `E:\`.
/// - Any other value keeps its text and gains exactly one trailing separator,
///   so `/media/usb` and `/media/usb/` compare equal.
pub fn canonical_identifier(identifier: &str) -> String {
    let trimmed = identifier.trim();
    let mut chars = trimmed.chars();

    match (chars.next(), chars.next(), chars.next(), chars.next()) {
        (Some(letter), None, None, None) if letter.is_ascii_alphabetic() => {
            format!("{}:\\", letter.to_ascii_uppercase())
        }
        (Some(letter), Some(':'), None, None) if letter.is_ascii_alphabetic() => {
            format!("{}:\\", letter.to_ascii_uppercase())
        }
        (Some(letter), Some(':'), Some('\\' | '/'), None) if letter.is_ascii_alphabetic() => {
            format!("{}:\\", letter.to_ascii_uppercase())
        }
        _ => {
            if trimmed.is_empty() {
                return String::new();
            }
            let separator = if trimmed.contains('\\') { '\\' } else { '/' };
            let stripped = trimmed.trim_end_matches(['/', '\\']);
            format!("{stripped}{separator}")
        }
    }
}

/// Returns whether two identifiers name the same volume root.
pub fn same_identifier(left: &str, right: &str) -> bool {
    let left = canonical_identifier(left);
    !left.is_empty() && left.to_lowercase() == canonical_identifier(right).to_lowercase()
}
