//! External AI classification module.
//!
//! Sends batches of raw emails to a text-understanding service and parses
//! the structured per-email guesses it returns. The service itself is an
//! external collaborator behind the [`EmailClassifier`] trait.

pub mod client;
pub mod error;
pub mod response;

pub use client::{AiClassifier, EmailClassifier};
pub use error::ClassifierError;
pub use response::ClassificationResult;
