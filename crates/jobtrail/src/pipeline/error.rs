//! Pipeline orchestration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a run.
///
/// Per-batch classification failures never appear here; they are logged
/// and absorbed inside the classification stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Extraction was skipped but the intermediate emails file is absent.
    /// Reported before any side effects; the ledger is untouched.
    #[error("Emails file '{0}' not found. Run extraction first or point --emails at an existing export")]
    MissingInput(PathBuf),

    /// Extraction was requested but no mail source is wired up.
    #[error("No mail source configured; rerun with --skip-extraction against an existing emails file")]
    NoMailSource,

    #[error("Email source error: {0}")]
    Email(#[from] crate::email::EmailError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] crate::ledger::LedgerError),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
