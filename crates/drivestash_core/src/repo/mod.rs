//! Key-value backends behind the record store.
//!
//! # Responsibility
//! - Define the two hash verbs the record store consumes.
//! - Keep Redis connection details inside the persistence boundary.
//!
//! # Invariants
//! - `set_fields` is an additive upsert; unlisted existing fields survive.
//! - `get_all_fields` returns an empty map for a missing key.

pub mod kv_backend;
pub mod memory_backend;
pub mod redis_backend;
