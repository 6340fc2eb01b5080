//! # Rollcall Audit
//!
//! In-memory audit trail for account administration.

mod audit_logger;

pub use audit_logger::{AuditEntry, AuditEventType, AuditLogger, AuditStats};
