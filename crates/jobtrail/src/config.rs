//! Run configuration loading and validation.

use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Conventional bounds for the classification batch size. Values outside
/// this range are warned about but not rejected.
pub const BATCH_SIZE_MIN: usize = 1;
pub const BATCH_SIZE_MAX: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// How many days back the mail source should look.
    #[serde(default = "default_days_back")]
    pub days_back: u32,

    /// Path of the intermediate raw-email JSON file (overwritten each run).
    #[serde(default = "default_emails_path")]
    pub emails_path: PathBuf,

    /// Path of the persisted CSV ledger.
    #[serde(default = "default_ledger_path")]
    pub ledger_path: PathBuf,

    /// Maximum number of emails per classification request.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Fixed pause after every classification batch, in seconds.
    #[serde(default = "default_batch_delay_secs")]
    pub batch_delay_secs: u64,

    /// Reuse the existing emails file instead of fetching from the mail source.
    #[serde(default)]
    pub skip_extraction: bool,

    #[serde(default)]
    pub classifier: ClassifierConfig,
}

fn default_days_back() -> u32 {
    30
}

fn default_emails_path() -> PathBuf {
    PathBuf::from("emails.json")
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("job_applications.csv")
}

fn default_batch_size() -> usize {
    10
}

fn default_batch_delay_secs() -> u64 {
    2
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            days_back: default_days_back(),
            emails_path: default_emails_path(),
            ledger_path: default_ledger_path(),
            batch_size: default_batch_size(),
            batch_delay_secs: default_batch_delay_secs(),
            skip_extraction: false,
            classifier: ClassifierConfig::default(),
        }
    }
}

/// Settings for the external classification service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with each request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum number of characters of email content included per message.
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_content_chars() -> usize {
    1000
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            model: default_model(),
            max_content_chars: default_max_content_chars(),
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<RunConfig, ConfigError> {
    let config: RunConfig = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &RunConfig) -> Result<(), ConfigError> {
    if config.batch_size == 0 {
        return Err(ConfigError::Validation {
            message: "batch_size must be at least 1".to_string(),
        });
    }

    if config.batch_size < BATCH_SIZE_MIN || config.batch_size > BATCH_SIZE_MAX {
        warn!(
            "batch_size {} is outside the conventional {}..={} range",
            config.batch_size, BATCH_SIZE_MIN, BATCH_SIZE_MAX
        );
    }

    if config.classifier.max_content_chars == 0 {
        return Err(ConfigError::Validation {
            message: "classifier.max_content_chars must be at least 1".to_string(),
        });
    }

    Ok(())
}
