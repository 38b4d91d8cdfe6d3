//! Sequential batch classification with per-batch failure isolation.

use std::time::Duration;

use log::{info, warn};

use crate::classifier::{ClassificationResult, EmailClassifier};
use crate::email::RawEmail;

/// Sends emails to the classifier in bounded consecutive batches.
///
/// Batches are submitted one at a time, strictly in input order. A failed
/// call or unparseable reply drops that batch's candidates and the run
/// continues; one bad batch never aborts the rest. After every batch,
/// regardless of outcome, a fixed pause respects the service's rate limits.
pub struct ClassificationPipeline<'a> {
    classifier: &'a dyn EmailClassifier,
    batch_size: usize,
    batch_delay: Duration,
}

impl<'a> ClassificationPipeline<'a> {
    pub fn new(
        classifier: &'a dyn EmailClassifier,
        batch_size: usize,
        batch_delay: Duration,
    ) -> Self {
        Self {
            classifier,
            batch_size: batch_size.max(1),
            batch_delay,
        }
    }

    /// Classifies all emails and returns the job-related candidates, in
    /// batch order.
    pub async fn classify_all(&self, emails: &[RawEmail]) -> Vec<ClassificationResult> {
        let total_batches = emails.len().div_ceil(self.batch_size);
        let mut collected: Vec<ClassificationResult> = Vec::new();

        for (i, batch) in emails.chunks(self.batch_size).enumerate() {
            match self.classifier.classify(batch).await {
                Ok(results) => {
                    info!(
                        "Batch {}/{}: {} emails, {} results",
                        i + 1,
                        total_batches,
                        batch.len(),
                        results.len()
                    );
                    collected.extend(results);
                }
                Err(e) => {
                    warn!(
                        "Batch {}/{} failed, skipping its {} emails: {}",
                        i + 1,
                        total_batches,
                        batch.len(),
                        e
                    );
                }
            }

            if !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        let job_related: Vec<ClassificationResult> = collected
            .into_iter()
            .filter(|r| r.is_job_related)
            .collect();

        info!("{} job-related candidates after filtering", job_related.len());
        job_related
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::error::ClassifierError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Classifier fake: one canned outcome per expected batch, in order.
    struct ScriptedClassifier {
        outcomes: Mutex<Vec<Result<Vec<ClassificationResult>, ClassifierError>>>,
    }

    impl ScriptedClassifier {
        fn new(outcomes: Vec<Result<Vec<ClassificationResult>, ClassifierError>>) -> Self {
            let mut outcomes = outcomes;
            outcomes.reverse();
            Self {
                outcomes: Mutex::new(outcomes),
            }
        }
    }

    #[async_trait]
    impl EmailClassifier for ScriptedClassifier {
        async fn classify(
            &self,
            _batch: &[RawEmail],
        ) -> Result<Vec<ClassificationResult>, ClassifierError> {
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn email(id: &str) -> RawEmail {
        RawEmail {
            id: id.to_string(),
            subject: String::new(),
            sender: String::new(),
            date: String::new(),
            content: String::new(),
        }
    }

    fn job_result(message_id: &str) -> ClassificationResult {
        ClassificationResult {
            message_id: message_id.to_string(),
            is_job_related: true,
            ..Default::default()
        }
    }

    fn other_result(message_id: &str) -> ClassificationResult {
        ClassificationResult {
            message_id: message_id.to_string(),
            is_job_related: false,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_batches_combined_in_order() {
        let classifier = ScriptedClassifier::new(vec![
            Ok(vec![job_result("m1")]),
            Ok(vec![job_result("m3")]),
        ]);
        let pipeline = ClassificationPipeline::new(&classifier, 2, Duration::ZERO);

        let emails: Vec<RawEmail> = (1..=4).map(|i| email(&format!("m{}", i))).collect();
        let results = pipeline.classify_all(&emails).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].message_id, "m1");
        assert_eq!(results[1].message_id, "m3");
    }

    #[tokio::test]
    async fn test_failed_middle_batch_is_isolated() {
        let classifier = ScriptedClassifier::new(vec![
            Ok(vec![job_result("m1")]),
            Err(ClassifierError::RequestFailed("connection reset".to_string())),
            Ok(vec![job_result("m3")]),
        ]);
        let pipeline = ClassificationPipeline::new(&classifier, 1, Duration::ZERO);

        let emails = vec![email("m1"), email("m2"), email("m3")];
        let results = pipeline.classify_all(&emails).await;

        let ids: Vec<&str> = results.iter().map(|r| r.message_id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m3"]);
    }

    #[tokio::test]
    async fn test_non_job_related_filtered_out() {
        let classifier = ScriptedClassifier::new(vec![Ok(vec![
            job_result("m1"),
            other_result("m2"),
        ])]);
        let pipeline = ClassificationPipeline::new(&classifier, 5, Duration::ZERO);

        let results = pipeline.classify_all(&[email("m1"), email("m2")]).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].message_id, "m1");
    }

    #[tokio::test]
    async fn test_missing_key_yields_empty_run() {
        let classifier = ScriptedClassifier::new(vec![
            Err(ClassifierError::MissingApiKey("OPENAI_API_KEY".to_string())),
            Err(ClassifierError::MissingApiKey("OPENAI_API_KEY".to_string())),
        ]);
        let pipeline = ClassificationPipeline::new(&classifier, 1, Duration::ZERO);

        let results = pipeline.classify_all(&[email("m1"), email("m2")]).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_no_emails_no_calls() {
        let classifier = ScriptedClassifier::new(vec![]);
        let pipeline = ClassificationPipeline::new(&classifier, 5, Duration::ZERO);

        let results = pipeline.classify_all(&[]).await;
        assert!(results.is_empty());
        assert!(classifier.outcomes.lock().unwrap().is_empty());
    }
}
