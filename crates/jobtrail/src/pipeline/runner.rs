//! End-to-end run orchestration.

use std::time::Duration;

use log::info;
use tracing::info_span;

use crate::classifier::EmailClassifier;
use crate::config::RunConfig;
use crate::email::{self, MailSource, RawEmail};
use crate::ledger::{self, current_timestamp, MergeEngine};
use crate::report::{summarize, LedgerSummary};

use super::classify::ClassificationPipeline;
use super::error::{PipelineError, Result};

/// Counts and summary for one completed run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Raw emails fed into classification.
    pub emails_seen: usize,
    /// Candidates the classifier marked job-related.
    pub job_related: usize,
    /// Ledger rows created by this run.
    pub rows_created: usize,
    /// Existing ledger rows updated by this run.
    pub rows_updated: usize,
    /// Ledger size after the merge.
    pub ledger_total: usize,
    pub summary: LedgerSummary,
}

/// Drives one full run: emails in, updated ledger and summary out.
///
/// The ledger is read once, merged in memory, and written once at the end;
/// a failure at any stage leaves the previous ledger file intact.
pub struct Runner {
    config: RunConfig,
}

impl Runner {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub async fn run(
        &self,
        mail_source: Option<&dyn MailSource>,
        classifier: &dyn EmailClassifier,
    ) -> Result<RunOutcome> {
        let emails = {
            let _step = info_span!("collect_emails").entered();
            self.collect_emails(mail_source)?
        };
        info!("Processing {} emails", emails.len());

        let candidates = {
            let _step = info_span!("classify").entered();
            let pipeline = ClassificationPipeline::new(
                classifier,
                self.config.batch_size,
                Duration::from_secs(self.config.batch_delay_secs),
            );
            pipeline.classify_all(&emails).await
        };

        let _step = info_span!("merge_and_save").entered();
        let existing = ledger::load_ledger(&self.config.ledger_path)?;

        let engine = MergeEngine::new();
        let next = engine.merge_at(&existing, &candidates, &current_timestamp());

        let rows_created = next.len() - existing.len();
        let rows_updated = existing
            .iter()
            .zip(next.iter())
            .filter(|(before, after)| before != after)
            .count();

        ledger::save_ledger(&self.config.ledger_path, &next)?;
        info!(
            "Ledger saved: {} rows ({} created, {} updated)",
            next.len(),
            rows_created,
            rows_updated
        );

        Ok(RunOutcome {
            emails_seen: emails.len(),
            job_related: candidates.len(),
            rows_created,
            rows_updated,
            ledger_total: next.len(),
            summary: summarize(&next),
        })
    }

    /// Obtains raw emails, either from the mail source (overwriting the
    /// intermediate file) or from a previous export when extraction is
    /// skipped. Checked before any classification or ledger work so a
    /// missing prerequisite terminates with no side effects.
    fn collect_emails(&self, mail_source: Option<&dyn MailSource>) -> Result<Vec<RawEmail>> {
        if self.config.skip_extraction {
            if !self.config.emails_path.exists() {
                return Err(PipelineError::MissingInput(self.config.emails_path.clone()));
            }
            return Ok(email::load_emails(&self.config.emails_path)?);
        }

        let source = mail_source.ok_or(PipelineError::NoMailSource)?;
        let emails = source.fetch(self.config.days_back)?;
        email::save_emails(&self.config.emails_path, &emails)?;
        Ok(emails)
    }
}
