//! rollcall accounts command

use admin::{AccountAdmin, InMemoryProfileStore, NewProfile, Profile};
use anyhow::Context;
use audit::AuditLogger;
use clap::{Args, Subcommand};
use serde_json::json;
use shared::{AppConfig, Role, SeedProfile};
use std::path::PathBuf;
use tracing::debug;

use super::emit;

#[derive(Debug, Args)]
pub struct AccountsCommand {
    /// Configuration file with seed profiles
    #[arg(short, long, default_value = "rollcall.json")]
    pub config: PathBuf,

    /// Email of the acting account
    #[arg(long = "as", value_name = "EMAIL")]
    pub acting_as: String,

    #[command(subcommand)]
    pub command: AccountsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum AccountsSubcommand {
    /// List accounts visible to the actor
    List {
        /// Restrict to these roles (repeatable)
        #[arg(short, long = "role")]
        roles: Vec<Role>,
    },
    /// Create an account
    Create {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        role: Role,
    },
    /// Change the role of an account
    SetRole {
        #[arg(long)]
        email: String,
        #[arg(long)]
        to: Role,
    },
    /// Delete an account
    Delete {
        #[arg(long)]
        email: String,
    },
}

/// Result of an accounts subcommand
#[derive(Debug)]
pub struct AccountsOutcome {
    pub value: serde_json::Value,
    pub lines: Vec<String>,
    /// Store contents to write back after a successful mutation
    pub seed: Option<Vec<SeedProfile>>,
}

impl AccountsCommand {
    pub fn run(&self, json: bool) -> anyhow::Result<()> {
        let outcome = self.apply()?;
        emit(json, &outcome.value, &outcome.lines)
    }

    /// Load the config, run the subcommand and persist any change to the store
    pub fn apply(&self) -> anyhow::Result<AccountsOutcome> {
        let mut config = AppConfig::from_file(&self.config)
            .with_context(|| format!("failed to load {}", self.config.display()))?;
        let mut outcome = self.execute(&config)?;

        if let Some(seed) = outcome.seed.take() {
            config.seed_profiles = seed;
            config
                .save(&self.config)
                .with_context(|| format!("failed to save {}", self.config.display()))?;
            debug!(path = %self.config.display(), profiles = config.seed_profiles.len(), "config saved");
            outcome.lines.push(format!("Saved {}", self.config.display()));
        }
        Ok(outcome)
    }

    /// Run the subcommand against a store seeded from `config`
    pub fn execute(&self, config: &AppConfig) -> anyhow::Result<AccountsOutcome> {
        let store = InMemoryProfileStore::from_seed(&config.seed_profiles)?;
        let mut admin = AccountAdmin::new(store, AuditLogger::new(config.audit_capacity));
        let actor = admin.actor_for(&self.acting_as)?;
        debug!(actor = %actor.email, role = %actor.role, "resolved acting account");

        let (profile, verb) = match &self.command {
            AccountsSubcommand::List { roles } => {
                let requested = (!roles.is_empty()).then_some(roles.as_slice());
                let profiles = admin.list_profiles(&actor, requested)?;
                let options = admin.role_filter_options(&actor);
                let value = json!({ "profiles": profiles, "filterOptions": options });
                let mut lines = vec![format!(
                    "{} accounts visible to {} ({})",
                    profiles.len(),
                    actor.email,
                    actor.role
                )];
                lines.extend(profiles.iter().map(describe));
                return Ok(AccountsOutcome {
                    value,
                    lines,
                    seed: None,
                });
            }
            AccountsSubcommand::Create { email, name, role } => {
                let profile = admin.create_profile(
                    &actor,
                    NewProfile {
                        email: email.clone(),
                        full_name: name.clone(),
                        role: *role,
                    },
                )?;
                (profile, "Created")
            }
            AccountsSubcommand::SetRole { email, to } => (admin.change_role(&actor, email, *to)?, "Updated"),
            AccountsSubcommand::Delete { email } => (admin.delete_profile(&actor, email)?, "Deleted"),
        };

        Ok(AccountsOutcome {
            value: json!(profile),
            lines: vec![format!("{} {}", verb, describe(&profile))],
            seed: Some(admin.store().to_seed()?),
        })
    }
}

fn describe(profile: &Profile) -> String {
    format!(
        "  {:<32} {:<12} {}",
        profile.email,
        profile.effective_role().as_str(),
        profile.full_name
    )
}
