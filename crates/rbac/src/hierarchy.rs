//! Role hierarchy - rank comparisons between roles
//!
//! Every function here is pure and total over [`Role`]. Callers turn a
//! `false` into a permission-denied failure (see [`crate::guard`]).

use shared::Role;
use std::collections::BTreeSet;

/// `true` iff `actor` strictly outranks `target`.
///
/// Equal ranks have no permission over each other, so one admin can never act
/// on another admin.
pub fn has_role_permission(actor: Role, target: Role) -> bool {
    actor.rank() > target.rank()
}

/// `true` iff `user` is at least `required`.
pub fn has_minimum_role(user: Role, required: Role) -> bool {
    user.rank() >= required.rank()
}

/// Whether `value` is exactly one of the stored role spellings
pub fn is_valid_role(value: &str) -> bool {
    value.parse::<Role>().is_ok()
}

/// Roles strictly below `role`.
///
/// Empty for the lowest role. An empty set means "manages nobody", never
/// "unrestricted".
pub fn get_managed_roles(role: Role) -> BTreeSet<Role> {
    Role::all()
        .filter(|target| has_role_permission(role, *target))
        .collect()
}

/// Whether `actor` may move an account from `from` to `to`.
///
/// The actor must outrank both the current role and the destination role.
pub fn can_change_role(actor: Role, from: Role, to: Role) -> bool {
    has_role_permission(actor, from) && has_role_permission(actor, to)
}

/// Whether an actor may set their own role to `to`.
///
/// Only the no-op transition is allowed; nobody can promote or demote themselves.
pub fn can_change_own_role(current: Role, to: Role) -> bool {
    current == to
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Role; 3] = [Role::User, Role::Admin, Role::Superadmin];

    // ============== Permission-over ==============

    #[test]
    fn test_no_role_outranks_itself() {
        for role in ALL {
            assert!(!has_role_permission(role, role), "{role} outranks itself");
        }
    }

    #[test]
    fn test_permission_matches_rank() {
        for a in ALL {
            for b in ALL {
                assert_eq!(has_role_permission(a, b), a.rank() > b.rank());
            }
        }
    }

    #[test]
    fn test_permission_is_antisymmetric() {
        for a in ALL {
            for b in ALL {
                assert!(!(has_role_permission(a, b) && has_role_permission(b, a)));
            }
        }
    }

    #[test]
    fn test_permission_is_transitive() {
        for a in ALL {
            for b in ALL {
                for c in ALL {
                    if has_role_permission(a, b) && has_role_permission(b, c) {
                        assert!(has_role_permission(a, c));
                    }
                }
            }
        }
    }

    #[test]
    fn test_permission_is_total_on_distinct_roles() {
        for a in ALL {
            for b in ALL {
                if a != b {
                    assert!(has_role_permission(a, b) || has_role_permission(b, a));
                }
            }
        }
    }

    #[test]
    fn test_specific_permissions() {
        assert!(has_role_permission(Role::Superadmin, Role::Admin));
        assert!(has_role_permission(Role::Superadmin, Role::User));
        assert!(has_role_permission(Role::Admin, Role::User));
        assert!(!has_role_permission(Role::Admin, Role::Superadmin));
        assert!(!has_role_permission(Role::User, Role::Admin));
    }

    // ============== Minimum role ==============

    #[test]
    fn test_has_minimum_role() {
        assert!(has_minimum_role(Role::Superadmin, Role::Admin));
        assert!(has_minimum_role(Role::Admin, Role::Admin));
        assert!(!has_minimum_role(Role::User, Role::Admin));
        assert!(has_minimum_role(Role::User, Role::User));
    }

    #[test]
    fn test_minimum_role_is_reflexive() {
        for role in ALL {
            assert!(has_minimum_role(role, role));
        }
    }

    // ============== Validation ==============

    #[test]
    fn test_is_valid_role() {
        assert!(is_valid_role("user"));
        assert!(is_valid_role("admin"));
        assert!(is_valid_role("superadmin"));
        assert!(!is_valid_role("owner"));
        assert!(!is_valid_role(""));
        assert!(!is_valid_role("Admin"));
        assert!(!is_valid_role("superadmin "));
        assert!(!is_valid_role("null"));
    }

    // ============== Managed roles ==============

    #[test]
    fn test_managed_roles() {
        assert!(get_managed_roles(Role::User).is_empty());
        assert_eq!(get_managed_roles(Role::Admin), BTreeSet::from([Role::User]));
        assert_eq!(
            get_managed_roles(Role::Superadmin),
            BTreeSet::from([Role::User, Role::Admin])
        );
    }

    #[test]
    fn test_managed_roles_agree_with_permission() {
        for actor in ALL {
            let managed = get_managed_roles(actor);
            for target in ALL {
                assert_eq!(managed.contains(&target), has_role_permission(actor, target));
            }
        }
    }

    // ============== Role changes ==============

    #[test]
    fn test_admin_cannot_grant_superadmin() {
        assert!(!can_change_role(Role::Admin, Role::User, Role::Superadmin));
    }

    #[test]
    fn test_superadmin_can_demote_admin() {
        assert!(can_change_role(Role::Superadmin, Role::Admin, Role::User));
        assert!(can_change_role(Role::Superadmin, Role::User, Role::Admin));
    }

    #[test]
    fn test_admin_cannot_touch_peer() {
        assert!(!can_change_role(Role::Admin, Role::Admin, Role::User));
    }

    #[test]
    fn test_nobody_can_grant_own_rank() {
        for actor in ALL {
            for from in ALL {
                assert!(!can_change_role(actor, from, actor));
            }
        }
    }

    #[test]
    fn test_user_cannot_change_anything() {
        for from in ALL {
            for to in ALL {
                assert!(!can_change_role(Role::User, from, to));
            }
        }
    }

    #[test]
    fn test_change_own_role_only_noop() {
        for current in ALL {
            for to in ALL {
                assert_eq!(can_change_own_role(current, to), current == to);
            }
        }
    }

    // ============== Purity ==============

    #[test]
    fn test_repeated_calls_are_identical() {
        for a in ALL {
            for b in ALL {
                assert_eq!(has_role_permission(a, b), has_role_permission(a, b));
                assert_eq!(has_minimum_role(a, b), has_minimum_role(a, b));
                assert_eq!(can_change_role(a, b, a), can_change_role(a, b, a));
            }
            assert_eq!(get_managed_roles(a), get_managed_roles(a));
        }
        assert_eq!(is_valid_role("admin"), is_valid_role("admin"));
    }

    #[test]
    fn test_concurrent_readers() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    (0..100)
                        .map(|_| get_managed_roles(Role::Superadmin).len())
                        .sum::<usize>()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 200);
        }
    }
}
