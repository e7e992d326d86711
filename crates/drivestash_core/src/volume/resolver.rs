//! Label <-> identifier lookups over a `VolumeSource`.

use super::{VolumeError, VolumeResult, VolumeSource};
use crate::model::volume::{same_identifier, Volume};
use log::{debug, info, warn};
use std::time::Instant;

/// Bidirectional volume lookup.
pub struct VolumeResolver<S: VolumeSource> {
    source: S,
}

impl<S: VolumeSource> VolumeResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Finds the identifier of the first ready, non-system volume whose label
    /// matches `label` case-insensitively.
    ///
    /// Returns `Ok(None)` when nothing matches, including when the only match
    /// is the system volume.
    ///
    /// # Errors
    /// - `VolumeError::Enumeration` when the OS volume list cannot be read.
    pub fn resolve_identifier_by_label(&self, label: &str) -> VolumeResult<Option<String>> {
        let started_at = Instant::now();
        let volumes = self.ready_volumes("resolve_identifier")?;
        let system_root = self.source.system_root();

        let found = volumes
            .into_iter()
            .filter(|volume| !is_system_volume(volume, system_root.as_deref()))
            .find(|volume| volume.label_matches(label))
            .map(|volume| volume.identifier);

        info!(
            "event=volume_resolve module=volume status=ok direction=label_to_identifier found={} duration_ms={}",
            found.is_some(),
            started_at.elapsed().as_millis()
        );
        Ok(found)
    }

    /// Finds the label of the ready volume at `identifier`.
    ///
    /// `identifier` may be a bare letter (`e`), a drive (`E:`) or a root path
    /// (`E:\`, `/media/usb`); comparison is case-insensitive on canonical form.
    ///
    /// # Errors
    /// - `VolumeError::Enumeration` when the OS volume list cannot be read.
    pub fn resolve_label_by_identifier(&self, identifier: &str) -> VolumeResult<Option<String>> {
        let started_at = Instant::now();
        let volumes = self.ready_volumes("resolve_label")?;

        let found = volumes
            .into_iter()
            .find(|volume| volume.identifier_matches(identifier))
            .map(|volume| volume.label);

        info!(
            "event=volume_resolve module=volume status=ok direction=identifier_to_label found={} duration_ms={}",
            found.is_some(),
            started_at.elapsed().as_millis()
        );
        Ok(found)
    }

    fn ready_volumes(&self, operation: &str) -> VolumeResult<Vec<Volume>> {
        match self.source.volumes() {
            Ok(volumes) => {
                let total = volumes.len();
                let ready: Vec<Volume> = volumes.into_iter().filter(|v| v.ready).collect();
                debug!(
                    "event=volume_enumerate module=volume status=ok op={} total={} ready={}",
                    operation,
                    total,
                    ready.len()
                );
                Ok(ready)
            }
            Err(err) => {
                warn!(
                    "event=volume_enumerate module=volume status=error op={} error={}",
                    operation, err
                );
                Err(VolumeError::Enumeration(err))
            }
        }
    }
}

fn is_system_volume(volume: &Volume, system_root: Option<&str>) -> bool {
    system_root.is_some_and(|root| same_identifier(&volume.identifier, root))
}
