//! rollcall init command

use clap::Args;
use shared::{AppConfig, Role, SeedProfile};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to initialize
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Create a config without sample accounts
    #[arg(long)]
    pub minimal: bool,

    /// Overwrite an existing rollcall.json
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        let path = self.write_config()?;
        println!("✓ Wrote {}", path.display());
        let config = AppConfig::from_file(&path)?;
        for email in config.seed_emails() {
            println!("  seeded {}", email);
        }
        Ok(())
    }

    /// Write rollcall.json into the target directory
    pub fn write_config(&self) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(&self.directory)?;
        let path = self.directory.join("rollcall.json");
        if is_initialized(&self.directory) && !self.force {
            anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
        }

        let config = if self.minimal {
            AppConfig::default()
        } else {
            sample_config()
        };
        config.save(&path)?;
        Ok(path)
    }
}

fn sample_config() -> AppConfig {
    let seed = |email: &str, name: &str, role: Role| SeedProfile {
        email: email.to_string(),
        full_name: name.to_string(),
        role: Some(role.as_str().to_string()),
    };

    AppConfig {
        seed_profiles: vec![
            seed("principal@school.test", "Principal", Role::Superadmin),
            seed("office@school.test", "School Office", Role::Admin),
            seed("student@school.test", "Sample Student", Role::User),
        ],
        ..AppConfig::default()
    }
}

/// Whether a directory already holds a config
pub fn is_initialized(directory: &Path) -> bool {
    directory.join("rollcall.json").exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = InitCommand {
            directory: dir.path().to_path_buf(),
            minimal: false,
            force: false,
        };

        let path = cmd.write_config().unwrap();
        assert!(is_initialized(dir.path()));

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(
            config.seed_emails(),
            vec!["principal@school.test", "office@school.test", "student@school.test"]
        );
        assert_eq!(config.seed_profiles[0].role.as_deref(), Some("superadmin"));
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let mut cmd = InitCommand {
            directory: dir.path().to_path_buf(),
            minimal: true,
            force: false,
        };

        cmd.write_config().unwrap();
        assert!(cmd.write_config().is_err());

        cmd.force = true;
        assert!(cmd.write_config().is_ok());
    }
}
