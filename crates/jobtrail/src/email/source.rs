//! Loading and saving the intermediate raw-email JSON file.

use std::path::Path;

use log::debug;

use crate::util::read_file_as_utf8;

use super::error::{EmailError, Result};
use super::model::RawEmail;

/// Black-box mail retrieval collaborator.
///
/// Implementations fetch messages from an actual mailbox (IMAP, a local
/// export, a vendor API). The pipeline only depends on this trait so tests
/// can substitute a canned source.
pub trait MailSource {
    /// Fetches messages received within the last `days_back` days.
    fn fetch(&self, days_back: u32) -> Result<Vec<RawEmail>>;
}

/// Loads raw emails from the intermediate JSON file.
///
/// If the file is not valid UTF-8, falls back to a raw-byte read with an
/// explicit lossy UTF-8 decode before JSON parsing. A missing file is an
/// error here; callers that tolerate absence check beforehand.
pub fn load_emails(path: &Path) -> Result<Vec<RawEmail>> {
    if !path.exists() {
        return Err(EmailError::FileNotFound(path.to_path_buf()));
    }

    let content = read_file_as_utf8(path).map_err(|e| EmailError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    let emails: Vec<RawEmail> = serde_json::from_str(&content)?;

    debug!("Loaded {} raw emails from {}", emails.len(), path.display());
    Ok(emails)
}

/// Writes raw emails to the intermediate JSON file, replacing any previous
/// contents. The file is regenerated on every extraction run.
pub fn save_emails(path: &Path, emails: &[RawEmail]) -> Result<()> {
    let json = serde_json::to_string_pretty(emails)?;
    std::fs::write(path, json).map_err(|e| EmailError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!("Wrote {} raw emails to {}", emails.len(), path.display());
    Ok(())
}
