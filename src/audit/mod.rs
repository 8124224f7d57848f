//! Audit logging
//!
//! Records every member and favor that is created or deleted, with the full
//! entity, in an append-only JSONL file next to the data directory.
//!
//! - `AuditEntry`: one operation on one entity
//! - `AuditLogger`: appends entries and reads them back

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
