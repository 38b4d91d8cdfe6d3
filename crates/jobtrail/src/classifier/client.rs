//! HTTP client for the external classification service.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ClassifierConfig;
use crate::email::RawEmail;

use super::error::{ClassifierError, Result};
use super::response::{parse_results, ClassificationResult};

/// Request timeout for one classification call. There is no finer-grained
/// timeout: a call either completes or fails outright.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Classification collaborator seam.
///
/// The production implementation calls a remote AI service; tests inject a
/// deterministic fake.
#[async_trait]
pub trait EmailClassifier: Send + Sync {
    /// Classifies one batch of emails, returning one structured guess per
    /// email the service chose to report on.
    async fn classify(&self, batch: &[RawEmail]) -> Result<Vec<ClassificationResult>>;
}

/// Classifier backed by an OpenAI-compatible chat-completions endpoint.
pub struct AiClassifier {
    client: Client,
    api_key: Option<SecretString>,
    api_key_env: String,
    base_url: String,
    model: String,
    max_content_chars: usize,
}

impl AiClassifier {
    /// Builds a classifier from config, reading the API key from the
    /// configured environment variable. A missing key is not an error
    /// here; each classify call reports it per batch instead.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.is_empty())
            .map(SecretString::from);

        Ok(Self {
            client: create_http_client()?,
            api_key,
            api_key_env: config.api_key_env.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_content_chars: config.max_content_chars,
        })
    }

    /// Builds the instruction asking for a strict machine-readable reply.
    fn build_prompt(&self, batch: &[RawEmail]) -> String {
        let mut emails_text = String::new();
        for (i, email) in batch.iter().enumerate() {
            emails_text.push_str(&format!(
                "--- Email {} ---\nmessage_id: {}\nFrom: {}\nDate: {}\nSubject: {}\nBody:\n{}\n\n",
                i + 1,
                email.id,
                email.sender,
                email.date,
                email.subject,
                email.trimmed_content(self.max_content_chars),
            ));
        }

        format!(
            r#"Analyze the following emails and decide for each one whether it relates to a job application the recipient has made.

Respond ONLY with a JSON array, one object per email, no other text. Each object must have exactly these fields:
- "message_id": string, copied from the email
- "is_job_related": boolean
- "company_name": string or null
- "job_title": string or null
- "application_status": string or null, one of "Applied", "Under Review", "Interview Scheduled", "Rejected", "Offer Received" or a short free-form status
- "confidence_score": number between 0.0 and 1.0
- "key_details": string, one-sentence summary
- "next_action": string, recommended next step or ""

{emails}"#,
            emails = emails_text,
        )
    }
}

#[async_trait]
impl EmailClassifier for AiClassifier {
    async fn classify(&self, batch: &[RawEmail]) -> Result<Vec<ClassificationResult>> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ClassifierError::MissingApiKey(self.api_key_env.clone()))?;

        let prompt = self.build_prompt(batch);
        debug!("Classifying batch of {} emails", batch.len());

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ClassifierError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::ServiceError {
                status: status.as_u16(),
                body: sanitize_error_body(&body),
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::RequestFailed(e.to_string()))?;

        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or("");

        parse_results(content)
    }
}

fn create_http_client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| ClassifierError::RequestFailed(e.to_string()))
}

/// Maximum length for sanitized error bodies to prevent log flooding.
const MAX_ERROR_BODY_LENGTH: usize = 200;

/// Truncates a service error body to a reasonable length before it reaches
/// logs or error chains. Counts characters, not bytes: error bodies are
/// arbitrary text and a byte cut can land inside a multibyte character.
fn sanitize_error_body(body: &str) -> String {
    if body.chars().count() > MAX_ERROR_BODY_LENGTH {
        let truncated: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
        format!("{}... (truncated)", truncated)
    } else {
        body.to_string()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: String,
}
