//! AuditLogger - Audit trail of account administration

use serde::{Deserialize, Serialize};
use shared::Role;
use std::collections::VecDeque;

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub timestamp: String,
    pub event_type: AuditEventType,
    pub actor_email: String,
    pub actor_role: Role,
    pub target_email: Option<String>,
    pub target_role: Option<Role>,
    pub success: bool,
    pub reason: Option<String>,
}

/// Types of audit events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    ProfilesListed,
    ProfileCreated,
    ProfileDeleted,
    RoleChanged,
    PermissionDenied,
}

/// Bounded audit logger; the oldest entry is dropped once full
#[derive(Debug)]
pub struct AuditLogger {
    entries: VecDeque<AuditEntry>,
    max_entries: usize,
}

impl AuditLogger {
    /// Create a new AuditLogger
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: AuditEntry) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Log a permitted operation
    pub fn log_success(
        &mut self,
        event_type: AuditEventType,
        actor_email: &str,
        actor_role: Role,
        target_email: Option<&str>,
        target_role: Option<Role>,
        reason: Option<String>,
    ) {
        self.log(AuditEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            event_type,
            actor_email: actor_email.to_string(),
            actor_role,
            target_email: target_email.map(|s| s.to_string()),
            target_role,
            success: true,
            reason,
        });
    }

    /// Log a denied operation
    pub fn log_denied(
        &mut self,
        actor_email: &str,
        actor_role: Role,
        target_email: Option<&str>,
        target_role: Option<Role>,
        reason: &str,
    ) {
        self.log(AuditEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            event_type: AuditEventType::PermissionDenied,
            actor_email: actor_email.to_string(),
            actor_role,
            target_email: target_email.map(|s| s.to_string()),
            target_role,
            success: false,
            reason: Some(reason.to_string()),
        });
    }

    /// Get recent entries, newest first
    pub fn get_recent(&self, limit: usize) -> Vec<&AuditEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    /// Get recent denials, newest first
    pub fn get_recent_denials(&self, limit: usize) -> Vec<&AuditEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| !e.success)
            .take(limit)
            .collect()
    }

    /// Get statistics
    pub fn get_stats(&self) -> AuditStats {
        let total = self.entries.len();
        let denials = self.entries.iter().filter(|e| !e.success).count();

        AuditStats {
            total_entries: total,
            denial_count: denials,
        }
    }

    /// Export as JSON
    pub fn export_json(&self) -> serde_json::Value {
        serde_json::to_value(self.entries.iter().collect::<Vec<_>>()).unwrap_or_default()
    }
}

/// Audit statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditStats {
    pub total_entries: usize,
    pub denial_count: usize,
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new(10000)
    }
}
