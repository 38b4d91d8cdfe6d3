//! Builder patterns for creating test data programmatically.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;

use jobtrail::classifier::ClassifierError;
use jobtrail::{ClassificationResult, EmailClassifier, RawEmail};

/// Builder for raw emails.
pub struct EmailBuilder {
    email: RawEmail,
}

impl EmailBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            email: RawEmail {
                id: id.to_string(),
                subject: format!("Subject for {}", id),
                sender: "recruiting@example.com".to_string(),
                date: "2026-08-01 09:00:00".to_string(),
                content: "Thank you for applying.".to_string(),
            },
        }
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.email.subject = subject.to_string();
        self
    }

    pub fn sender(mut self, sender: &str) -> Self {
        self.email.sender = sender.to_string();
        self
    }

    pub fn content(mut self, content: &str) -> Self {
        self.email.content = content.to_string();
        self
    }

    pub fn build(self) -> RawEmail {
        self.email
    }
}

/// Builder for classification results. Job-related by default.
pub struct CandidateBuilder {
    result: ClassificationResult,
}

impl CandidateBuilder {
    pub fn new(message_id: &str) -> Self {
        Self {
            result: ClassificationResult {
                message_id: message_id.to_string(),
                is_job_related: true,
                ..Default::default()
            },
        }
    }

    pub fn company(mut self, company: &str) -> Self {
        self.result.company_name = Some(company.to_string());
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.result.job_title = Some(title.to_string());
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.result.application_status = Some(status.to_string());
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.result.confidence_score = confidence;
        self
    }

    pub fn next_action(mut self, next_action: &str) -> Self {
        self.result.next_action = next_action.to_string();
        self
    }

    pub fn key_details(mut self, key_details: &str) -> Self {
        self.result.key_details = key_details.to_string();
        self
    }

    pub fn not_job_related(mut self) -> Self {
        self.result.is_job_related = false;
        self
    }

    pub fn build(self) -> ClassificationResult {
        self.result
    }
}

/// Classifier fake that plays back one scripted outcome per batch, in
/// order. Batches beyond the script yield empty results.
pub struct ScriptedClassifier {
    outcomes: Mutex<Vec<Result<Vec<ClassificationResult>, ClassifierError>>>,
    calls: Mutex<usize>,
}

impl ScriptedClassifier {
    pub fn new(outcomes: Vec<Result<Vec<ClassificationResult>, ClassifierError>>) -> Self {
        let mut outcomes = outcomes;
        outcomes.reverse();
        Self {
            outcomes: Mutex::new(outcomes),
            calls: Mutex::new(0),
        }
    }

    /// Number of classify calls observed so far.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl EmailClassifier for ScriptedClassifier {
    async fn classify(
        &self,
        _batch: &[RawEmail],
    ) -> Result<Vec<ClassificationResult>, ClassifierError> {
        *self.calls.lock().unwrap() += 1;
        self.outcomes
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
