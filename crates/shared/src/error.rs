//! Error types for Rollcall

use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a string is not one of the known role spellings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role '{value}'. Expected one of: user, admin, superadmin")]
pub struct UnknownRoleError {
    pub value: String,
}

/// Admin-management operation being authorized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    View,
    Create,
    Delete,
    ChangeRole,
    Manage,
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AdminAction::View => "view",
            AdminAction::Create => "create",
            AdminAction::Delete => "delete",
            AdminAction::ChangeRole => "change role of",
            AdminAction::Manage => "manage",
        };
        f.write_str(s)
    }
}

/// Error returned when the acting role does not outrank what it touches
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Role '{actor_role}' may not {action} {}", describe_target(.target_role, .reason))]
pub struct ForbiddenError {
    pub action: AdminAction,
    pub actor_role: Role,
    pub target_role: Option<Role>,
    pub reason: Option<String>,
}

fn describe_target(target_role: &Option<Role>, reason: &Option<String>) -> String {
    let target = match target_role {
        Some(role) => format!("'{}' accounts", role),
        None => "any account".to_string(),
    };
    match reason {
        Some(reason) => format!("{}: {}", target, reason),
        None => target,
    }
}

impl ForbiddenError {
    pub fn new(action: AdminAction, actor_role: Role, target_role: Option<Role>) -> Self {
        Self {
            action,
            actor_role,
            target_role,
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Error returned when no profile exists for an email
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Profile '{email}' not found")]
pub struct ProfileNotFoundError {
    pub email: String,
}

/// General Rollcall error type
#[derive(Debug, Error)]
pub enum RollcallError {
    #[error(transparent)]
    UnknownRole(#[from] UnknownRoleError),

    #[error(transparent)]
    Forbidden(#[from] ForbiddenError),

    #[error(transparent)]
    ProfileNotFound(#[from] ProfileNotFoundError),

    #[error("Profile '{0}' already exists")]
    DuplicateProfile(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RollcallError {
    /// Whether this error should surface as a permission-denied response
    pub fn is_forbidden(&self) -> bool {
        matches!(self, RollcallError::Forbidden(_))
    }
}

pub type Result<T> = std::result::Result<T, RollcallError>;
