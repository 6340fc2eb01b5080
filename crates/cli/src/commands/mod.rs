//! CLI Commands

pub mod init;
pub mod roles;
pub mod policy;
pub mod accounts;

pub use init::InitCommand;
pub use roles::RolesCommand;
pub use policy::PolicyCommand;
pub use accounts::AccountsCommand;

/// Print a JSON value or a block of human-readable lines
pub(crate) fn emit(json: bool, value: &serde_json::Value, lines: &[String]) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        for line in lines {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Render a yes/no answer
pub(crate) fn verdict(allowed: bool) -> String {
    if allowed {
        console::style("allowed").green().to_string()
    } else {
        console::style("denied").red().to_string()
    }
}
