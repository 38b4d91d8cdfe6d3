pub mod classifier;
pub mod config;
pub mod email;
pub mod error;
pub mod ledger;
pub mod pipeline;
pub mod report;
mod util;

pub use classifier::{AiClassifier, ClassificationResult, EmailClassifier};
pub use config::{load_config, ClassifierConfig, RunConfig};
pub use email::{MailSource, RawEmail};
pub use error::{ConfigError, JobtrailError, Result};
pub use ledger::{LedgerRecord, MergeEngine, RecordFormatter};
pub use pipeline::{ClassificationPipeline, Runner, RunOutcome};
pub use report::{summarize, LedgerSummary};
