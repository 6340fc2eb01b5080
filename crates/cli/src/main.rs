//! Rollcall CLI - Command-line interface for account role administration
//!
//! Usage:
//!   rollcall init [dir]                                 - Write a sample rollcall.json
//!   rollcall roles list                                 - List roles and ranks
//!   rollcall roles managed --role <role>                - Roles a role can manage
//!   rollcall policy check --actor <role> --target <role>
//!   rollcall policy change --actor <role> --from <role> --to <role>
//!   rollcall accounts --as <email> list                 - Accounts visible to an actor

use clap::{Parser, Subcommand};
use cli::commands::{AccountsCommand, InitCommand, PolicyCommand, RolesCommand};

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Rollcall - Role hierarchy and account administration")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sample configuration
    Init(InitCommand),
    /// Inspect the role hierarchy
    Roles(RolesCommand),
    /// Evaluate permission checks between roles
    Policy(PolicyCommand),
    /// Administer accounts from a seeded store
    Accounts(AccountsCommand),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init(cmd) => cmd.run(),
        Commands::Roles(cmd) => cmd.run(cli.json),
        Commands::Policy(cmd) => cmd.run(cli.json),
        Commands::Accounts(cmd) => cmd.run(cli.json),
    }
}
