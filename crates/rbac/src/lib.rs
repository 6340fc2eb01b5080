//! # Rollcall RBAC
//!
//! Role hierarchy and permission checking for account administration.
//!
//! ## Components
//!
//! - `hierarchy` - Pure rank comparisons over the fixed role table
//! - `AccessGuard` - Converts denied checks into `Forbidden` errors

pub mod hierarchy;
pub mod guard;

pub use hierarchy::{
    can_change_own_role, can_change_role, get_managed_roles, has_minimum_role,
    has_role_permission, is_valid_role,
};
pub use guard::{normalize_email, AccessGuard, Actor};
