//! Audit trail of auto-fill runs.

mod audit_model;
mod audit_store;

pub use audit_model::AuditRecord;
pub use audit_store::{AuditSink, InMemoryAuditSink};
