//! Drive lookup + record round trip, in that order.
//!
//! # Invariants
//! - A volume enumeration failure is reported as "not found" and the run
//!   continues with the store.
//! - A store failure aborts the run and is returned to the caller.

use crate::config::AppConfig;
use crate::model::record::RecordFields;
use crate::repo::kv_backend::{KvBackend, StoreError};
use crate::service::record_store::RecordStore;
use crate::volume::{VolumeResolver, VolumeSource};
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};

pub type DemoResult<T> = Result<T, DemoError>;

#[derive(Debug)]
pub enum DemoError {
    Store(StoreError),
    Output(io::Error),
}

impl Display for DemoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "failed to write demo output: {err}"),
        }
    }
}

impl Error for DemoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Output(err) => Some(err),
        }
    }
}

impl From<StoreError> for DemoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<io::Error> for DemoError {
    fn from(value: io::Error) -> Self {
        Self::Output(value)
    }
}

/// Outcome of one demo run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DemoReport {
    pub drive_label: String,
    pub drive_identifier: Option<String>,
    pub verified_label: Option<String>,
    pub drive_error: Option<String>,
    pub record_key: String,
    pub record: Option<RecordFields>,
}

/// Runs the lookup and round trip, writing progress lines to `out`.
pub fn run_demo<S, B, W>(
    config: &AppConfig,
    resolver: &VolumeResolver<S>,
    store: &RecordStore<B>,
    out: &mut W,
) -> DemoResult<DemoReport>
where
    S: VolumeSource,
    B: KvBackend,
    W: Write,
{
    info!("event=demo_run module=service status=start");
    let mut report = DemoReport {
        drive_label: config.drive_label.clone(),
        record_key: store
            .storage_key(&config.record_id)
            .map_err(StoreError::from)?,
        ..DemoReport::default()
    };

    resolve_drive(config, resolver, &mut report, out)?;
    round_trip_record(config, store, &mut report, out)?;

    info!(
        "event=demo_run module=service status=ok drive_found={} record_found={}",
        report.drive_identifier.is_some(),
        report.record.is_some()
    );
    Ok(report)
}

fn resolve_drive<S: VolumeSource, W: Write>(
    config: &AppConfig,
    resolver: &VolumeResolver<S>,
    report: &mut DemoReport,
    out: &mut W,
) -> DemoResult<()> {
    let label = config.drive_label.as_str();
    writeln!(out, "Searching for external drive named '{label}'...")?;

    let identifier = match resolver.resolve_identifier_by_label(label) {
        Ok(identifier) => identifier,
        Err(err) => {
            writeln!(out, "ERROR: {err}")?;
            report.drive_error = Some(err.to_string());
            None
        }
    };

    let Some(identifier) = identifier else {
        writeln!(out, "FAILURE: Could not find an external drive named '{label}'.")?;
        writeln!(out, "Please ensure the drive is connected and has the correct name.")?;
        return Ok(());
    };

    writeln!(out, "SUCCESS: Found drive: {identifier}")?;
    match resolver.resolve_label_by_identifier(&identifier) {
        Ok(Some(verified)) => {
            writeln!(out, "SUCCESS: Verified drive name: {verified}")?;
            report.verified_label = Some(verified);
        }
        Ok(None) => {
            writeln!(out, "FAILURE: Drive {identifier} disappeared before verification.")?;
        }
        Err(err) => {
            writeln!(out, "ERROR: {err}")?;
            report.drive_error = Some(err.to_string());
        }
    }
    report.drive_identifier = Some(identifier);
    Ok(())
}

fn round_trip_record<B: KvBackend, W: Write>(
    config: &AppConfig,
    store: &RecordStore<B>,
    report: &mut DemoReport,
    out: &mut W,
) -> DemoResult<()> {
    let record_id = config.record_id.as_str();
    writeln!(out, "--- Testing key-value store ---")?;

    store.save(record_id, &config.sample_fields)?;
    writeln!(
        out,
        "SUCCESS: Saved record '{record_id}' with key '{}'.",
        report.record_key
    )?;

    writeln!(out)?;
    writeln!(out, "Attempting to retrieve record with ID '{record_id}'...")?;
    match store.fetch(record_id)? {
        Some(fields) => {
            writeln!(out, "SUCCESS: Found record! Details:")?;
            for (name, value) in &fields {
                writeln!(out, "  - {name}: {value}")?;
            }
            report.record = Some(fields);
        }
        None => {
            writeln!(out, "FAILURE: Could not find record with ID '{record_id}'.")?;
        }
    }
    Ok(())
}
