//! AccessGuard - turns hierarchy answers into admin-management decisions

use crate::hierarchy::{can_change_own_role, can_change_role, get_managed_roles, has_role_permission};
use serde::{Deserialize, Serialize};
use shared::{AdminAction, ForbiddenError, Result, Role};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Authenticated caller of an admin operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub email: String,
    pub role: Role,
}

impl Actor {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    /// Build an actor from a stored role column, falling back to the lowest role
    pub fn from_stored(email: impl Into<String>, role: Option<&str>) -> Self {
        Self::new(email, Role::from_stored(role))
    }

    /// Whether `email` identifies this actor's own account
    pub fn is_same_account(&self, email: &str) -> bool {
        normalize_email(&self.email) == normalize_email(email)
    }
}

/// Canonical form used for identity comparison
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Permission checks for the admin-management endpoints
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGuard;

impl AccessGuard {
    pub fn new() -> Self {
        Self
    }

    /// Deny everything for actors who manage no roles
    pub fn ensure_can_manage(&self, actor: &Actor) -> Result<()> {
        if get_managed_roles(actor.role).is_empty() {
            return Err(deny(ForbiddenError::new(AdminAction::Manage, actor.role, None)));
        }
        Ok(())
    }

    pub fn ensure_can_view(&self, actor: &Actor, target_role: Role) -> Result<()> {
        self.ensure_outranks(actor, AdminAction::View, target_role)
    }

    pub fn ensure_can_create(&self, actor: &Actor, new_role: Role) -> Result<()> {
        self.ensure_can_manage(actor)?;
        self.ensure_outranks(actor, AdminAction::Create, new_role)
    }

    pub fn ensure_can_delete(&self, actor: &Actor, target_email: &str, target_role: Role) -> Result<()> {
        self.ensure_can_manage(actor)?;
        if actor.is_same_account(target_email) {
            return Err(deny(
                ForbiddenError::new(AdminAction::Delete, actor.role, Some(target_role))
                    .with_reason("cannot delete own account"),
            ));
        }
        self.ensure_outranks(actor, AdminAction::Delete, target_role)
    }

    pub fn ensure_can_change_role(
        &self,
        actor: &Actor,
        target_email: &str,
        from: Role,
        to: Role,
    ) -> Result<()> {
        self.ensure_can_manage(actor)?;
        if actor.is_same_account(target_email) {
            if can_change_own_role(from, to) {
                return Ok(());
            }
            return Err(deny(
                ForbiddenError::new(AdminAction::ChangeRole, actor.role, Some(from))
                    .with_reason("cannot change own role"),
            ));
        }

        if !can_change_role(actor.role, from, to) {
            let blocking = if has_role_permission(actor.role, from) { to } else { from };
            return Err(deny(
                ForbiddenError::new(AdminAction::ChangeRole, actor.role, Some(blocking))
                    .with_reason(format!("cannot move '{}' to '{}'", from, to)),
            ));
        }

        debug!(actor = %actor.email, %from, %to, "role change permitted");
        Ok(())
    }

    /// Resolve the role set an actor's listing is restricted to.
    ///
    /// Without an explicit filter this is the full managed set. An explicit
    /// filter must only name managed roles.
    pub fn visible_roles(&self, actor: &Actor, requested: Option<&[Role]>) -> Result<BTreeSet<Role>> {
        self.ensure_can_manage(actor)?;
        let managed = get_managed_roles(actor.role);

        match requested {
            None | Some([]) => Ok(managed),
            Some(roles) => {
                for role in roles {
                    if !managed.contains(role) {
                        return Err(deny(ForbiddenError::new(
                            AdminAction::View,
                            actor.role,
                            Some(*role),
                        )));
                    }
                }
                Ok(roles.iter().copied().collect())
            }
        }
    }

    /// Roles offered in filter and role-assignment choices, lowest first
    pub fn role_filter_options(&self, actor: &Actor) -> Vec<Role> {
        get_managed_roles(actor.role).into_iter().collect()
    }

    fn ensure_outranks(&self, actor: &Actor, action: AdminAction, target_role: Role) -> Result<()> {
        if !has_role_permission(actor.role, target_role) {
            return Err(deny(ForbiddenError::new(action, actor.role, Some(target_role))));
        }
        Ok(())
    }
}

fn deny(err: ForbiddenError) -> shared::RollcallError {
    warn!(
        action = %err.action,
        actor_role = %err.actor_role,
        target_role = ?err.target_role.map(Role::as_str),
        "permission denied"
    );
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::RollcallError;

    fn superadmin() -> Actor {
        Actor::new("head@school.test", Role::Superadmin)
    }

    fn admin() -> Actor {
        Actor::new("office@school.test", Role::Admin)
    }

    fn student() -> Actor {
        Actor::new("student@school.test", Role::User)
    }

    fn forbidden(result: Result<impl std::fmt::Debug>) -> ForbiddenError {
        match result {
            Err(RollcallError::Forbidden(err)) => err,
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }

    #[test]
    fn test_same_account_comparison() {
        let actor = Actor::new("Head@School.test", Role::Superadmin);
        assert!(actor.is_same_account(" head@school.test "));
        assert!(!actor.is_same_account("other@school.test"));
    }

    #[test]
    fn test_actor_from_stored_fails_closed() {
        assert_eq!(Actor::from_stored("a@school.test", Some("root")).role, Role::User);
        assert_eq!(Actor::from_stored("a@school.test", None).role, Role::User);
        assert_eq!(Actor::from_stored("a@school.test", Some("admin")).role, Role::Admin);
    }

    #[test]
    fn test_user_cannot_manage() {
        let guard = AccessGuard::new();
        let err = forbidden(guard.ensure_can_manage(&student()));
        assert_eq!(err.action, AdminAction::Manage);
        assert!(guard.ensure_can_manage(&admin()).is_ok());
    }

    #[test]
    fn test_view_and_create() {
        let guard = AccessGuard::new();
        assert!(guard.ensure_can_view(&admin(), Role::User).is_ok());
        assert!(guard.ensure_can_view(&admin(), Role::Admin).is_err());
        assert!(guard.ensure_can_create(&superadmin(), Role::Admin).is_ok());

        let err = forbidden(guard.ensure_can_create(&admin(), Role::Superadmin));
        assert_eq!(err.target_role, Some(Role::Superadmin));
    }

    #[test]
    fn test_admin_cannot_delete_peer() {
        let guard = AccessGuard::new();
        let err = forbidden(guard.ensure_can_delete(&admin(), "other@school.test", Role::Admin));
        assert_eq!(err.action, AdminAction::Delete);
    }

    #[test]
    fn test_cannot_delete_self() {
        let guard = AccessGuard::new();
        let actor = superadmin();
        let err = forbidden(guard.ensure_can_delete(&actor, "HEAD@school.test", Role::Superadmin));
        assert!(err.reason.unwrap().contains("own account"));
    }

    #[test]
    fn test_change_role_of_other() {
        let guard = AccessGuard::new();
        assert!(guard
            .ensure_can_change_role(&superadmin(), "x@school.test", Role::Admin, Role::User)
            .is_ok());

        let err = forbidden(guard.ensure_can_change_role(
            &admin(),
            "x@school.test",
            Role::User,
            Role::Superadmin,
        ));
        assert_eq!(err.target_role, Some(Role::Superadmin));

        let err = forbidden(guard.ensure_can_change_role(
            &admin(),
            "x@school.test",
            Role::Admin,
            Role::User,
        ));
        assert_eq!(err.target_role, Some(Role::Admin));
    }

    #[test]
    fn test_self_demotion_denied() {
        let guard = AccessGuard::new();
        let actor = superadmin();
        let err = forbidden(guard.ensure_can_change_role(
            &actor,
            &actor.email,
            Role::Superadmin,
            Role::User,
        ));
        assert!(err.reason.unwrap().contains("own role"));

        assert!(guard
            .ensure_can_change_role(&actor, &actor.email, Role::Superadmin, Role::Superadmin)
            .is_ok());
    }

    #[test]
    fn test_user_denied_every_mutation() {
        let guard = AccessGuard::new();
        let actor = student();

        let err = forbidden(guard.ensure_can_change_role(&actor, &actor.email, Role::User, Role::User));
        assert_eq!(err.action, AdminAction::Manage);

        let err = forbidden(guard.ensure_can_delete(&actor, "other@school.test", Role::User));
        assert_eq!(err.action, AdminAction::Manage);

        let err = forbidden(guard.ensure_can_create(&actor, Role::User));
        assert_eq!(err.action, AdminAction::Manage);
    }

    #[test]
    fn test_visible_roles_default_is_managed_set() {
        let guard = AccessGuard::new();
        assert_eq!(
            guard.visible_roles(&superadmin(), None).unwrap(),
            BTreeSet::from([Role::User, Role::Admin])
        );
        assert_eq!(guard.visible_roles(&admin(), Some([Role::User; 0].as_slice())).unwrap(), BTreeSet::from([Role::User]));
    }

    #[test]
    fn test_visible_roles_empty_managed_set_is_denied() {
        let guard = AccessGuard::new();
        assert!(guard.visible_roles(&student(), None).is_err());
        assert!(guard.visible_roles(&student(), Some([Role::User].as_slice())).is_err());
    }

    #[test]
    fn test_visible_roles_explicit_filter() {
        let guard = AccessGuard::new();
        assert_eq!(
            guard.visible_roles(&superadmin(), Some([Role::Admin].as_slice())).unwrap(),
            BTreeSet::from([Role::Admin])
        );

        let err = forbidden(guard.visible_roles(&admin(), Some([Role::User, Role::Admin].as_slice())));
        assert_eq!(err.target_role, Some(Role::Admin));
    }

    #[test]
    fn test_role_filter_options() {
        let guard = AccessGuard::new();
        assert!(guard.role_filter_options(&student()).is_empty());
        assert_eq!(guard.role_filter_options(&admin()), vec![Role::User]);
        assert_eq!(
            guard.role_filter_options(&superadmin()),
            vec![Role::User, Role::Admin]
        );
    }
}
