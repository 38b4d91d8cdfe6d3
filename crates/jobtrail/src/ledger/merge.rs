//! The merge engine: combines newly classified candidates with the
//! existing ledger without duplicating or corrupting rows.

use std::collections::HashMap;

use log::debug;

use crate::classifier::ClassificationResult;

use super::key::{build_key_index, existing_message_ids, record_key};
use super::record::{current_timestamp, LedgerRecord, RecordFormatter};

/// Merges candidate batches into ledger states.
///
/// `merge_at` is a pure function of its inputs: given the same existing
/// ledger, candidates and timestamp it always produces the same output, and
/// it never fails. Malformed candidates are absorbed by the formatter's
/// defaulting before any matching happens.
#[derive(Debug, Default)]
pub struct MergeEngine {
    formatter: RecordFormatter,
}

impl MergeEngine {
    pub fn new() -> Self {
        Self {
            formatter: RecordFormatter::new(),
        }
    }

    /// Merges with the current time as the merge timestamp.
    pub fn merge(
        &self,
        existing: &[LedgerRecord],
        candidates: &[ClassificationResult],
    ) -> Vec<LedgerRecord> {
        self.merge_at(existing, candidates, &current_timestamp())
    }

    /// Produces the next ledger state.
    ///
    /// Candidates whose message id is already in the ledger are skipped
    /// outright (cheap pre-filter; business-key matching decides the rest).
    /// A candidate whose business key matches an existing row becomes an
    /// update; within one batch the last matching candidate wins. A novel
    /// key creates a new row, and a second novel candidate with the same
    /// key in the same batch updates that pending row instead of
    /// duplicating it.
    ///
    /// Output order: existing rows in their original order (updated in
    /// place), then new rows in candidate arrival order.
    pub fn merge_at(
        &self,
        existing: &[LedgerRecord],
        candidates: &[ClassificationResult],
        now: &str,
    ) -> Vec<LedgerRecord> {
        let known_ids = existing_message_ids(existing);
        let key_index = build_key_index(existing);

        // Updates keyed by business key (last write wins), new rows in
        // arrival order with their own key index for within-batch dedup.
        let mut updates_by_key: HashMap<String, LedgerRecord> = HashMap::new();
        let mut fresh: Vec<LedgerRecord> = Vec::new();
        let mut fresh_index: HashMap<String, usize> = HashMap::new();

        for candidate in candidates {
            if known_ids.contains(&candidate.message_id) {
                debug!(
                    "Skipping candidate {}: message already recorded",
                    candidate.message_id
                );
                continue;
            }

            let formatted = self.formatter.format_at(candidate, now);
            let key = record_key(&formatted);

            if key_index.contains_key(&key) {
                updates_by_key.insert(key, formatted);
            } else if let Some(&pos) = fresh_index.get(&key) {
                fresh[pos] = apply_update(&fresh[pos], &formatted);
            } else {
                fresh_index.insert(key, fresh.len());
                fresh.push(formatted);
            }
        }

        let mut next: Vec<LedgerRecord> = existing
            .iter()
            .map(|record| match updates_by_key.get(&record_key(record)) {
                Some(update) => apply_update(record, update),
                None => record.clone(),
            })
            .collect();

        next.extend(fresh);
        next
    }
}

/// Field-by-field update precedence for a matching candidate.
///
/// Identity and passthrough fields stay with the existing row; observed
/// fields take the latest value; confidence never regresses; the touch
/// timestamps advance to the update's creation time (the merge time).
fn apply_update(existing: &LedgerRecord, update: &LedgerRecord) -> LedgerRecord {
    LedgerRecord {
        message_id: existing.message_id.clone(),
        company_name: update.company_name.clone(),
        job_title: update.job_title.clone(),
        application_status: update.application_status.clone(),
        date_received: existing.date_received.clone(),
        date_applied: existing.date_applied.clone(),
        last_contact: update.created_at.clone(),
        next_action: update.next_action.clone(),
        key_details: update.key_details.clone(),
        confidence_score: update.confidence_score.max(existing.confidence_score),
        email_subject: existing.email_subject.clone(),
        sender: existing.sender.clone(),
        created_at: existing.created_at.clone(),
        updated_at: update.created_at.clone(),
    }
}
