//! Read-only aggregate views over a ledger snapshot.

use std::collections::BTreeMap;

use crate::ledger::LedgerRecord;

/// How many companies the top-companies ranking includes.
const TOP_COMPANIES: usize = 10;

/// How many records the highlight lists include.
const HIGHLIGHT_LIMIT: usize = 5;

/// Records above this confidence count as high-confidence.
const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Aggregate snapshot of the ledger. Derived, never persisted.
#[derive(Debug, Clone, Default)]
pub struct LedgerSummary {
    /// Total number of tracked applications.
    pub total: usize,

    /// Record counts grouped by application status.
    pub by_status: BTreeMap<String, usize>,

    /// Top companies by record count, descending; ties keep first-seen
    /// order.
    pub top_companies: Vec<(String, usize)>,

    /// Up to five records with confidence above the threshold, in ledger
    /// order.
    pub high_confidence: Vec<LedgerRecord>,

    /// Up to five records with a non-empty next action, in ledger order.
    pub pending_actions: Vec<LedgerRecord>,
}

/// Summarizes a ledger snapshot. Tolerates an empty ledger.
pub fn summarize(records: &[LedgerRecord]) -> LedgerSummary {
    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        *by_status.entry(record.application_status.clone()).or_insert(0) += 1;
    }

    // Count per company, remembering first-seen position for stable ties
    let mut company_counts: Vec<(String, usize, usize)> = Vec::new();
    for (pos, record) in records.iter().enumerate() {
        match company_counts
            .iter_mut()
            .find(|(name, _, _)| *name == record.company_name)
        {
            Some((_, count, _)) => *count += 1,
            None => company_counts.push((record.company_name.clone(), 1, pos)),
        }
    }
    company_counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    let top_companies = company_counts
        .into_iter()
        .take(TOP_COMPANIES)
        .map(|(name, count, _)| (name, count))
        .collect();

    let high_confidence = records
        .iter()
        .filter(|r| r.confidence_score > HIGH_CONFIDENCE_THRESHOLD)
        .take(HIGHLIGHT_LIMIT)
        .cloned()
        .collect();

    let pending_actions = records
        .iter()
        .filter(|r| !r.next_action.is_empty())
        .take(HIGHLIGHT_LIMIT)
        .cloned()
        .collect();

    LedgerSummary {
        total: records.len(),
        by_status,
        top_companies,
        high_confidence,
        pending_actions,
    }
}
