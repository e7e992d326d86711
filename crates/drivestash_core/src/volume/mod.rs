//! Volume enumeration seam and label/identifier resolution.
//!
//! # Responsibility
//! - Abstract OS volume enumeration behind `VolumeSource`.
//! - Resolve labels to identifiers and back over fresh snapshots.
//!
//! # Invariants
//! - Only `ready` volumes take part in either lookup direction.
//! - The system volume is never returned from a label lookup.
//! - Results are never cached; device presence changes externally.

use crate::model::volume::Volume;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

mod resolver;
mod system;

pub use resolver::VolumeResolver;
pub use system::SystemVolumeSource;

pub type VolumeResult<T> = Result<T, VolumeError>;

/// Failure while reading the OS volume list.
#[derive(Debug)]
pub enum VolumeError {
    Enumeration(io::Error),
}

impl Display for VolumeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enumeration(err) => write!(f, "failed to enumerate volumes: {err}"),
        }
    }
}

impl Error for VolumeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Enumeration(err) => Some(err),
        }
    }
}

impl From<io::Error> for VolumeError {
    fn from(value: io::Error) -> Self {
        Self::Enumeration(value)
    }
}

/// Source of currently mounted volumes.
pub trait VolumeSource {
    /// Enumerates all mounted volumes, ready or not, in OS order.
    fn volumes(&self) -> io::Result<Vec<Volume>>;

    /// Root identifier of the volume hosting the operating system.
    fn system_root(&self) -> Option<String>;
}

impl<S: VolumeSource + ?Sized> VolumeSource for &S {
    fn volumes(&self) -> io::Result<Vec<Volume>> {
        (**self).volumes()
    }

    fn system_root(&self) -> Option<String> {
        (**self).system_root()
    }
}
