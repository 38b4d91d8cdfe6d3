//! Raw email input module.
//!
//! This module defines the raw email record produced by the external mail
//! collaborator and the JSON load/save path for the intermediate mailbox
//! export. Actual mail retrieval lives behind the [`MailSource`] trait.

pub mod error;
pub mod model;
pub mod source;

pub use error::EmailError;
pub use model::RawEmail;
pub use source::{load_emails, save_emails, MailSource};
