//! End-to-end orchestration: raw emails in, updated ledger out.

pub mod classify;
pub mod error;
pub mod runner;

pub use classify::ClassificationPipeline;
pub use error::PipelineError;
pub use runner::{RunOutcome, Runner};
