//! CSV persistence for the ledger.
//!
//! The ledger is read once at the start of a run and written once at the
//! end from a fully computed next state; there is no incremental writing.
//! Records are persisted in merge-output order (existing rows first, new
//! arrivals after), which is stable across runs. The predecessor system
//! sorted by the never-populated date_received column, which ordered
//! nothing; insertion order replaces that.

use std::path::Path;

use log::debug;

use crate::util::read_file_as_utf8;

use super::error::{LedgerError, Result};
use super::record::LedgerRecord;

/// Canonical column set, in order. Must match the field order of
/// [`LedgerRecord`].
pub const COLUMNS: [&str; 14] = [
    "message_id",
    "company_name",
    "job_title",
    "application_status",
    "date_received",
    "date_applied",
    "last_contact",
    "next_action",
    "key_details",
    "confidence_score",
    "email_subject",
    "sender",
    "created_at",
    "updated_at",
];

/// Loads the ledger from disk.
///
/// A missing or empty file is an empty ledger, not an error: the first run
/// of the tool starts from nothing.
pub fn load_ledger(path: &Path) -> Result<Vec<LedgerRecord>> {
    if !path.exists() {
        debug!("Ledger file {} not found, starting empty", path.display());
        return Ok(Vec::new());
    }

    let content = read_file_as_utf8(path).map_err(|e| LedgerError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: LedgerRecord = result?;
        records.push(record);
    }

    debug!("Loaded {} ledger records from {}", records.len(), path.display());
    Ok(records)
}

/// Writes the ledger to disk, replacing any previous contents.
///
/// Always writes the canonical header row, even for an empty ledger.
pub fn save_ledger(path: &Path, records: &[LedgerRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|e| LedgerError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!("Wrote {} ledger records to {}", records.len(), path.display());
    Ok(())
}
