//! Ledger persistence error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the ledger file.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Failed to read ledger file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write ledger file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Ledger CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
