//! Core use-case services.
//!
//! # Responsibility
//! - Expose record save/fetch over any `KvBackend`.
//! - Run the drive lookup and record round trip as one demo sequence.
//! - Keep the CLI decoupled from OS and store details.

pub mod demo;
pub mod record_store;
