//! The application ledger: records, business keys, merge engine, and the
//! CSV persistence layer.
//!
//! This is the part of the system with real invariants: at most one row per
//! business key, monotonic confidence, immutable creation provenance. The
//! merge engine is a pure function over the previous ledger state and a
//! batch of candidates, so re-running over overlapping mail windows can
//! never duplicate or corrupt rows.

pub mod error;
pub mod key;
pub mod merge;
pub mod record;
pub mod store;

pub use error::LedgerError;
pub use key::{build_key_index, business_key, existing_message_ids, record_key};
pub use merge::MergeEngine;
pub use record::{current_timestamp, LedgerRecord, RecordFormatter, TIMESTAMP_FORMAT};
pub use store::{load_ledger, save_ledger};
