//! Business key derivation and lookup indexes.

use std::collections::{HashMap, HashSet};

use super::record::LedgerRecord;

/// Computes the deduplication key for a (company, title) pair.
///
/// Exact concatenation of the two already-defaulted fields joined by an
/// underscore. Case-sensitive, no trimming: "the same application" means
/// the classifier extracted the same strings.
pub fn business_key(company_name: &str, job_title: &str) -> String {
    format!("{}_{}", company_name, job_title)
}

/// The business key of a ledger record.
pub fn record_key(record: &LedgerRecord) -> String {
    business_key(&record.company_name, &record.job_title)
}

/// Maps each business key to the position of its record.
///
/// The ledger invariant is at most one record per key; if a hand-edited
/// file violates that, the first occurrence wins here.
pub fn build_key_index(records: &[LedgerRecord]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(records.len());
    for (pos, record) in records.iter().enumerate() {
        index.entry(record_key(record)).or_insert(pos);
    }
    index
}

/// Collects the message ids already absorbed into the ledger.
///
/// Used as a cheap pre-filter to skip candidates re-extracted from an email
/// that was already recorded. The business-key merge is the authoritative
/// dedup layer; a message id reappearing with different extracted fields is
/// still skipped by this filter.
pub fn existing_message_ids(records: &[LedgerRecord]) -> HashSet<String> {
    records.iter().map(|r| r.message_id.clone()).collect()
}
