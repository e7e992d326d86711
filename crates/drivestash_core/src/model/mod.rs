//! Plain data shapes shared by the resolver and the record store.
//!
//! # Responsibility
//! - Describe OS volumes as transient snapshots.
//! - Describe flat string records and their write-time validation.
//!
//! # Invariants
//! - Volumes are never cached; every lookup enumerates fresh snapshots.
//! - Records carry no schema; callers agree on field names out of band.

pub mod record;
pub mod volume;
