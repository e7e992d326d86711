//! Operating-system backed `VolumeSource`.
//!
//! Disk listing comes from `sysinfo`. Labels come from the disk name on
//! Windows and from `/dev/disk/by-label` elsewhere.

use super::VolumeSource;
use crate::model::volume::Volume;
use std::io;
use sysinfo::{Disk, Disks};

#[cfg(not(windows))]
use std::collections::HashMap;
#[cfg(not(windows))]
use std::path::{Path, PathBuf};

#[cfg(not(windows))]
const LABEL_DIR: &str = "/dev/disk/by-label";

/// Enumerates volumes mounted on this machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemVolumeSource;

impl SystemVolumeSource {
    pub fn new() -> Self {
        Self
    }
}

impl VolumeSource for SystemVolumeSource {
    fn volumes(&self) -> io::Result<Vec<Volume>> {
        let disks = Disks::new_with_refreshed_list();
        let labels = LabelIndex::load()?;

        Ok(disks
            .list()
            .iter()
            .map(|disk| {
                Volume::new(
                    disk.mount_point().to_string_lossy().into_owned(),
                    labels.label_for(disk),
                    disk.total_space() > 0,
                )
            })
            .collect())
    }

    fn system_root(&self) -> Option<String> {
        system_root()
    }
}

#[cfg(windows)]
fn system_root() -> Option<String> {
    let windir = std::env::var_os("windir").or_else(|| std::env::var_os("SystemRoot"));
    let root = windir
        .as_deref()
        .map(std::path::Path::new)
        .and_then(|path| path.ancestors().last())
        .map(|root| root.to_string_lossy().into_owned())
        .filter(|root| !root.is_empty());
    Some(root.unwrap_or_else(|| "C:\\".to_string()))
}

#[cfg(not(windows))]
fn system_root() -> Option<String> {
    Some("/".to_string())
}

#[cfg(windows)]
struct LabelIndex;

#[cfg(windows)]
impl LabelIndex {
    fn load() -> io::Result<Self> {
        Ok(Self)
    }

    fn label_for(&self, disk: &Disk) -> String {
        disk.name().to_string_lossy().into_owned()
    }
}

/// Device path -> label, built from the udev label symlinks.
#[cfg(not(windows))]
struct LabelIndex {
    by_device: HashMap<PathBuf, String>,
}

#[cfg(not(windows))]
impl LabelIndex {
    fn load() -> io::Result<Self> {
        let entries = match std::fs::read_dir(LABEL_DIR) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self {
                    by_device: HashMap::new(),
                })
            }
            Err(err) => return Err(err),
        };

        let mut by_device = HashMap::new();
        for entry in entries {
            let entry = entry?;
            let label = unescape_udev_label(&entry.file_name().to_string_lossy());
            // Dangling links belong to devices that vanished mid-scan.
            if let Ok(device) = std::fs::canonicalize(entry.path()) {
                by_device.insert(device, label);
            }
        }
        Ok(Self { by_device })
    }

    fn label_for(&self, disk: &Disk) -> String {
        let device = Path::new(disk.name());
        let device = std::fs::canonicalize(device).unwrap_or_else(|_| device.to_path_buf());
        self.by_device.get(&device).cloned().unwrap_or_default()
    }
}

/// Decodes udev's `\xHH` escapes (spaces arrive as `\x20`).
#[cfg(not(windows))]
fn unescape_udev_label(raw: &str) -> String {
    let mut bytes = Vec::with_capacity(raw.len());
    let source = raw.as_bytes();
    let mut index = 0;
    while index < source.len() {
        if source[index] == b'\\' && source.get(index + 1) == Some(&b'x') {
            let decoded = source
                .get(index + 2..index + 4)
                .and_then(|hex| std::str::from_utf8(hex).ok())
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = decoded {
                bytes.push(byte);
                index += 4;
                continue;
            }
        }
        bytes.push(source[index]);
        index += 1;
    }
    String::from_utf8_lossy(&bytes).into_owned()
}
