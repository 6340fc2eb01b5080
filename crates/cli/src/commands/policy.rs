//! rollcall policy command

use clap::{Args, Subcommand};
use rbac::{can_change_own_role, can_change_role, has_minimum_role, has_role_permission};
use serde_json::json;
use shared::Role;

use super::{emit, verdict};

#[derive(Debug, Args)]
pub struct PolicyCommand {
    #[command(subcommand)]
    pub command: PolicySubcommand,
}

#[derive(Debug, Subcommand)]
pub enum PolicySubcommand {
    /// Check whether one role has permission over another
    Check {
        /// Acting role
        #[arg(short, long)]
        actor: Role,
        /// Target role
        #[arg(short, long)]
        target: Role,
    },
    /// Check whether a role transition is allowed
    Change {
        /// Acting role
        #[arg(short, long)]
        actor: Role,
        /// Current role of the account
        #[arg(long)]
        from: Role,
        /// Requested role
        #[arg(long)]
        to: Role,
        /// The account being changed is the actor's own
        #[arg(long)]
        self_change: bool,
    },
}

impl PolicyCommand {
    pub fn run(&self, json: bool) -> anyhow::Result<()> {
        let (value, lines) = self.evaluate()?;
        emit(json, &value, &lines)
    }

    pub fn evaluate(&self) -> anyhow::Result<(serde_json::Value, Vec<String>)> {
        match &self.command {
            PolicySubcommand::Check { actor, target } => {
                let permission = has_role_permission(*actor, *target);
                let minimum = has_minimum_role(*actor, *target);
                let value = json!({
                    "actor": actor,
                    "target": target,
                    "hasPermission": permission,
                    "hasMinimumRole": minimum,
                });
                let lines = vec![
                    format!("'{}' acting on '{}' accounts: {}", actor, target, verdict(permission)),
                    format!("'{}' is at least '{}': {}", actor, target, verdict(minimum)),
                ];
                Ok((value, lines))
            }
            PolicySubcommand::Change {
                actor,
                from,
                to,
                self_change,
            } => {
                if *self_change && actor != from {
                    anyhow::bail!(
                        "--self-change requires --from to match --actor ('{}' vs '{}')",
                        from,
                        actor
                    );
                }
                let allowed = if *self_change {
                    can_change_own_role(*from, *to)
                } else {
                    can_change_role(*actor, *from, *to)
                };
                let value = json!({
                    "actor": actor,
                    "from": from,
                    "to": to,
                    "selfChange": self_change,
                    "allowed": allowed,
                });
                let lines = vec![format!(
                    "'{}' changing {} from '{}' to '{}': {}",
                    actor,
                    if *self_change { "own role" } else { "an account" },
                    from,
                    to,
                    verdict(allowed)
                )];
                Ok((value, lines))
            }
        }
    }
}
