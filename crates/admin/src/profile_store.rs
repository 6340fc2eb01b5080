//! Profile Store - Abstract persistence for account profiles
//!
//! The store keeps the role column as raw text, exactly as persisted.
//! Callers resolve it through [`Profile::effective_role`].

use chrono::{DateTime, Utc};
use rbac::normalize_email;
use serde::{Deserialize, Serialize};
use shared::{ProfileNotFoundError, RollcallError, Role};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

/// Errors that can occur during store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Profile not found: {email}")]
    NotFound { email: String },

    #[error("Profile already exists: {email}")]
    Duplicate { email: String },

    #[error("Persistence error: {message}")]
    Persistence { message: String },
}

impl From<StoreError> for RollcallError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { email } => ProfileNotFoundError { email }.into(),
            StoreError::Duplicate { email } => RollcallError::DuplicateProfile(email),
            StoreError::Persistence { message } => RollcallError::Store(message),
        }
    }
}

/// Account profile row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    /// Stored role text; may be legacy or corrupt
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(email: impl Into<String>, full_name: impl Into<String>, role: Role) -> Self {
        Self::with_raw_role(email, full_name, role.as_str())
    }

    /// Build a profile whose role column holds arbitrary stored text
    pub fn with_raw_role(
        email: impl Into<String>,
        full_name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            full_name: full_name.into(),
            role: role.into(),
            created_at: Utc::now(),
        }
    }

    /// Role used for every permission decision about this profile.
    ///
    /// Unrecognized stored values resolve to the lowest role.
    pub fn effective_role(&self) -> Role {
        match self.role.parse::<Role>() {
            Ok(role) => role,
            Err(_) => {
                warn!(email = %self.email, stored_role = %self.role, "unrecognized stored role, treating as user");
                Role::lowest()
            }
        }
    }
}

/// Select predicate for profiles
#[derive(Debug, Clone, Default)]
pub struct ProfileFilter {
    /// Only profiles whose effective role is in this set
    pub roles: Option<BTreeSet<Role>>,
    /// Case-insensitive email substring
    pub email_contains: Option<String>,
}

impl ProfileFilter {
    pub fn with_roles(roles: BTreeSet<Role>) -> Self {
        Self {
            roles: Some(roles),
            email_contains: None,
        }
    }

    pub fn matches(&self, profile: &Profile) -> bool {
        if let Some(roles) = &self.roles {
            if !roles.contains(&profile.effective_role()) {
                return false;
            }
        }
        if let Some(needle) = &self.email_contains {
            if !normalize_email(&profile.email).contains(&normalize_email(needle)) {
                return false;
            }
        }
        true
    }
}

/// Profile Store Trait
///
/// Port for the account table. No async here; adapters decide.
pub trait ProfileStore {
    /// Profiles matching the filter, in no particular order
    fn select(&self, filter: &ProfileFilter) -> Result<Vec<Profile>, StoreError>;

    /// Find a profile by email (case-insensitive)
    fn find_by_email(&self, email: &str) -> Result<Option<Profile>, StoreError>;

    /// Insert a new profile; fails if the email is taken
    fn insert(&mut self, profile: Profile) -> Result<(), StoreError>;

    /// Overwrite the stored role text of a profile
    fn update_role(&mut self, email: &str, role: Role) -> Result<Profile, StoreError>;

    /// Remove a profile
    fn delete(&mut self, email: &str) -> Result<Profile, StoreError>;

    /// Total number of profiles
    fn count(&self) -> Result<usize, StoreError>;
}
