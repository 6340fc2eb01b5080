//! rollcall roles command

use clap::{Args, Subcommand};
use rbac::get_managed_roles;
use serde_json::json;
use shared::Role;

use super::emit;

#[derive(Debug, Args)]
pub struct RolesCommand {
    #[command(subcommand)]
    pub command: RolesSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum RolesSubcommand {
    /// List all roles with their rank
    List,
    /// Show the roles a given role can manage
    Managed {
        /// Role to inspect
        #[arg(short, long)]
        role: Role,
    },
}

impl RolesCommand {
    pub fn run(&self, json: bool) -> anyhow::Result<()> {
        let (value, lines) = self.evaluate();
        emit(json, &value, &lines)
    }

    pub fn evaluate(&self) -> (serde_json::Value, Vec<String>) {
        match &self.command {
            RolesSubcommand::List => {
                let value = json!(Role::all()
                    .map(|r| json!({ "role": r, "rank": r.rank(), "name": r.display_name() }))
                    .collect::<Vec<_>>());
                let mut lines = vec!["Available roles:".to_string()];
                lines.extend(
                    Role::all().map(|r| format!("  {} {:<10} {}", r.rank(), r.as_str(), r.display_name())),
                );
                (value, lines)
            }
            RolesSubcommand::Managed { role } => {
                let managed: Vec<Role> = get_managed_roles(*role).into_iter().collect();
                let value = json!({ "role": role, "managed": managed });
                let lines = if managed.is_empty() {
                    vec![format!("'{}' cannot manage any role", role)]
                } else {
                    let names: Vec<&str> = managed.iter().map(|r| r.as_str()).collect();
                    vec![format!("'{}' manages: {}", role, names.join(", "))]
                };
                (value, lines)
            }
        }
    }
}
