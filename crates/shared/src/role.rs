//! Role - the privilege label attached to an account
//!
//! Roles form a closed set with a strict total order by rank:
//!
//! | role         | rank |
//! |--------------|------|
//! | `user`       | 1    |
//! | `admin`      | 2    |
//! | `superadmin` | 3    |
//!
//! The lowercase spellings are persisted verbatim in account storage and
//! compared by exact string equality.

use crate::error::UnknownRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Privilege label of an account
///
/// Variant order matches rank, so the derived `Ord` agrees with `rank()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account (students, staff without admin rights)
    User,
    /// Can manage `user` accounts
    Admin,
    /// Can manage `admin` and `user` accounts
    Superadmin,
}

/// Fixed rank table, lowest privilege first.
pub const ROLE_HIERARCHY: [(Role, u8); 3] = [
    (Role::User, 1),
    (Role::Admin, 2),
    (Role::Superadmin, 3),
];

impl Role {
    /// Integer rank used for every privilege comparison
    pub const fn rank(self) -> u8 {
        match self {
            Role::User => ROLE_HIERARCHY[0].1,
            Role::Admin => ROLE_HIERARCHY[1].1,
            Role::Superadmin => ROLE_HIERARCHY[2].1,
        }
    }

    /// Stored spelling of this role
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
        }
    }

    /// Human-readable label for listings
    pub fn display_name(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Admin => "Admin",
            Role::Superadmin => "Super Admin",
        }
    }

    /// All roles in ascending rank order
    pub fn all() -> impl Iterator<Item = Role> {
        ROLE_HIERARCHY.into_iter().map(|(role, _)| role)
    }

    /// Lowest-privilege role, used whenever stored role data is unusable
    pub const fn lowest() -> Role {
        Role::User
    }

    /// Resolve a role string from an untrusted source.
    ///
    /// Unknown, empty or differently-cased values resolve to the lowest role so
    /// that corrupt data loses privilege instead of gaining it.
    pub fn parse_or_default(value: &str) -> Role {
        value.parse().unwrap_or(Role::lowest())
    }

    /// Like [`Role::parse_or_default`], for nullable stored columns
    pub fn from_stored(value: Option<&str>) -> Role {
        value.map(Role::parse_or_default).unwrap_or(Role::lowest())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ROLE_HIERARCHY
            .iter()
            .map(|(role, _)| *role)
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRoleError {
                value: s.to_string(),
            })
    }
}
