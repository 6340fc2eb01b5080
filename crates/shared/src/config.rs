//! Configuration types for Rollcall

use serde::{Deserialize, Serialize};

fn default_audit_capacity() -> usize {
    10_000
}

/// Profile seeded into the store at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedProfile {
    /// Login email, unique per profile
    pub email: String,

    /// Display name
    #[serde(default)]
    pub full_name: String,

    /// Raw role text as it would be stored; resolved fail-closed
    #[serde(default)]
    pub role: Option<String>,
}

/// Application configuration (rollcall.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Maximum number of audit entries kept in memory
    #[serde(default = "default_audit_capacity")]
    pub audit_capacity: usize,

    /// Profiles loaded into the in-memory store
    #[serde(default)]
    pub seed_profiles: Vec<SeedProfile>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            audit_capacity: default_audit_capacity(),
            seed_profiles: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        if config.audit_capacity == 0 {
            return Err(crate::RollcallError::Config(
                "auditCapacity must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }

    /// Write configuration back as pretty JSON
    pub fn save(&self, path: &std::path::Path) -> crate::Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Seeded emails
    pub fn seed_emails(&self) -> Vec<&str> {
        self.seed_profiles.iter().map(|p| p.email.as_str()).collect()
    }
}
