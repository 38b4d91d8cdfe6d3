//! Ledger record shape and the formatter that builds records from
//! classification results.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::classifier::ClassificationResult;

/// Timestamp format used for all ledger time fields.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Substituted when the classifier reports no company.
pub const DEFAULT_COMPANY: &str = "Unknown";

/// Substituted when the classifier reports no job title.
pub const DEFAULT_JOB_TITLE: &str = "Not Specified";

/// Returns the current local time formatted for ledger fields.
pub fn current_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// One row of the persisted ledger; the unit of deduplication and update.
///
/// Field order here is the CSV column order. `date_received`, `date_applied`,
/// `email_subject` and `sender` are passthrough fields the merge path never
/// populates; they are preserved verbatim across updates for future
/// enrichment from the raw email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// Identifier of the first email that created this row. Not the dedup
    /// key; never changed by later updates.
    pub message_id: String,
    pub company_name: String,
    pub job_title: String,
    /// Free-form status, latest observation wins.
    pub application_status: String,
    pub date_received: String,
    pub date_applied: String,
    /// Set to the merge time whenever a matching update touches this row.
    pub last_contact: String,
    pub next_action: String,
    pub key_details: String,
    /// Monotonic non-decreasing across merges.
    pub confidence_score: f64,
    pub email_subject: String,
    pub sender: String,
    /// Set once at creation, immutable afterwards.
    pub created_at: String,
    /// Set on every touch, including creation.
    pub updated_at: String,
}

/// Normalizes classification results into canonical ledger records.
///
/// Total: every result formats successfully, with defaults substituted for
/// anything the classifier left out. All call sites share this one source
/// of truth for defaulting.
#[derive(Debug, Default)]
pub struct RecordFormatter;

impl RecordFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Formats a result using the current time for all timestamp fields.
    pub fn format(&self, result: &ClassificationResult) -> LedgerRecord {
        self.format_at(result, &current_timestamp())
    }

    /// Formats a result with an explicit timestamp. The merge engine uses
    /// this so every record touched in one merge carries the same time.
    pub fn format_at(&self, result: &ClassificationResult, now: &str) -> LedgerRecord {
        LedgerRecord {
            message_id: result.message_id.clone(),
            company_name: non_empty_or(result.company_name.as_deref(), DEFAULT_COMPANY),
            job_title: non_empty_or(result.job_title.as_deref(), DEFAULT_JOB_TITLE),
            application_status: result.application_status.clone().unwrap_or_default(),
            date_received: String::new(),
            date_applied: String::new(),
            last_contact: now.to_string(),
            next_action: result.next_action.clone(),
            key_details: result.key_details.clone(),
            confidence_score: result.confidence_score,
            email_subject: String::new(),
            sender: String::new(),
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }
}

fn non_empty_or(value: Option<&str>, default: &str) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}
