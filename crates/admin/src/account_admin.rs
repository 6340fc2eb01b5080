//! AccountAdmin - Role-gated account management over a profile store

use audit::{AuditEventType, AuditLogger};
use rbac::{AccessGuard, Actor};
use serde::{Deserialize, Serialize};
use shared::{ProfileNotFoundError, Result, RollcallError, Role};
use tracing::info;

use crate::profile_store::{Profile, ProfileFilter, ProfileStore};

/// Input for creating an account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

/// Admin-management operations, each checked against the role hierarchy
#[derive(Debug)]
pub struct AccountAdmin<S: ProfileStore> {
    store: S,
    guard: AccessGuard,
    audit: AuditLogger,
}

impl<S: ProfileStore> AccountAdmin<S> {
    pub fn new(store: S, audit: AuditLogger) -> Self {
        Self {
            store,
            guard: AccessGuard::new(),
            audit,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Resolve the acting identity from the store, fail-closed on its role
    pub fn actor_for(&self, email: &str) -> Result<Actor> {
        let profile = self.require(email)?;
        Ok(Actor::new(profile.email.clone(), profile.effective_role()))
    }

    /// Roles the actor may filter by or assign
    pub fn role_filter_options(&self, actor: &Actor) -> Vec<Role> {
        self.guard.role_filter_options(actor)
    }

    /// Profiles visible to the actor, sorted by email
    pub fn list_profiles(&mut self, actor: &Actor, requested: Option<&[Role]>) -> Result<Vec<Profile>> {
        let roles = match self.guard.visible_roles(actor, requested) {
            Ok(roles) => roles,
            Err(err) => return Err(self.record_denial(actor, None, None, err)),
        };

        let mut profiles = self.store.select(&ProfileFilter::with_roles(roles))?;
        profiles.sort_by(|a, b| a.email.cmp(&b.email));

        self.audit.log_success(
            AuditEventType::ProfilesListed,
            &actor.email,
            actor.role,
            None,
            None,
            Some(format!("{} profiles", profiles.len())),
        );
        Ok(profiles)
    }

    pub fn create_profile(&mut self, actor: &Actor, input: NewProfile) -> Result<Profile> {
        if let Err(err) = self.guard.ensure_can_create(actor, input.role) {
            return Err(self.record_denial(actor, Some(input.email.as_str()), Some(input.role), err));
        }

        let profile = Profile::new(input.email, input.full_name, input.role);
        self.store.insert(profile.clone())?;

        info!(actor = %actor.email, email = %profile.email, role = %input.role, "profile created");
        self.audit.log_success(
            AuditEventType::ProfileCreated,
            &actor.email,
            actor.role,
            Some(profile.email.as_str()),
            Some(input.role),
            None,
        );
        Ok(profile)
    }

    pub fn delete_profile(&mut self, actor: &Actor, email: &str) -> Result<Profile> {
        self.ensure_can_manage(actor, email)?;
        let target = self.require(email)?;
        let target_role = target.effective_role();

        if let Err(err) = self.guard.ensure_can_delete(actor, &target.email, target_role) {
            return Err(self.record_denial(actor, Some(target.email.as_str()), Some(target_role), err));
        }

        let removed = self.store.delete(&target.email)?;

        info!(actor = %actor.email, email = %removed.email, "profile deleted");
        self.audit.log_success(
            AuditEventType::ProfileDeleted,
            &actor.email,
            actor.role,
            Some(removed.email.as_str()),
            Some(target_role),
            None,
        );
        Ok(removed)
    }

    pub fn change_role(&mut self, actor: &Actor, email: &str, to: Role) -> Result<Profile> {
        self.ensure_can_manage(actor, email)?;
        let target = self.require(email)?;
        let from = target.effective_role();

        if let Err(err) = self.guard.ensure_can_change_role(actor, &target.email, from, to) {
            return Err(self.record_denial(actor, Some(target.email.as_str()), Some(from), err));
        }

        let updated = self.store.update_role(&target.email, to)?;

        info!(actor = %actor.email, email = %updated.email, %from, %to, "role changed");
        self.audit.log_success(
            AuditEventType::RoleChanged,
            &actor.email,
            actor.role,
            Some(updated.email.as_str()),
            Some(to),
            Some(format!("{} -> {}", from, to)),
        );
        Ok(updated)
    }

    /// Checked before any lookup so that actors who manage nobody learn nothing
    /// about which accounts exist
    fn ensure_can_manage(&mut self, actor: &Actor, target_email: &str) -> Result<()> {
        if let Err(err) = self.guard.ensure_can_manage(actor) {
            return Err(self.record_denial(actor, Some(target_email), None, err));
        }
        Ok(())
    }

    fn require(&self, email: &str) -> Result<Profile> {
        self.store.find_by_email(email)?.ok_or_else(|| {
            ProfileNotFoundError {
                email: email.to_string(),
            }
            .into()
        })
    }

    fn record_denial(
        &mut self,
        actor: &Actor,
        target_email: Option<&str>,
        target_role: Option<Role>,
        err: RollcallError,
    ) -> RollcallError {
        if err.is_forbidden() {
            self.audit.log_denied(
                &actor.email,
                actor.role,
                target_email,
                target_role,
                &err.to_string(),
            );
        }
        err
    }
}
