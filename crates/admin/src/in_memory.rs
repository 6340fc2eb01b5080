//! In-Memory Profile Store
//!
//! Thread-safe store keyed by normalized email. Useful for testing and the CLI.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use rbac::normalize_email;
use shared::{Role, SeedProfile};

use crate::profile_store::{Profile, ProfileFilter, ProfileStore, StoreError};

/// In-memory Profile Store
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<String, Profile>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Build a store from configured seed profiles
    pub fn from_seed(seed: &[SeedProfile]) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for entry in seed {
            let profile = Profile::with_raw_role(
                entry.email.clone(),
                entry.full_name.clone(),
                entry.role.clone().unwrap_or_default(),
            );
            store.insert(profile)?;
        }
        Ok(store)
    }

    /// Snapshot every profile as seed entries, sorted by email.
    ///
    /// Stored role text is written back unchanged; an empty role becomes `None`.
    pub fn to_seed(&self) -> Result<Vec<SeedProfile>, StoreError> {
        let mut seed: Vec<SeedProfile> = self
            .read_lock()?
            .values()
            .map(|p| SeedProfile {
                email: p.email.clone(),
                full_name: p.full_name.clone(),
                role: (!p.role.is_empty()).then(|| p.role.clone()),
            })
            .collect();
        seed.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(seed)
    }

    fn read_lock(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Profile>>, StoreError> {
        self.profiles.read().map_err(|_| StoreError::Persistence {
            message: "Failed to acquire read lock".to_string(),
        })
    }

    fn write_lock(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Profile>>, StoreError> {
        self.profiles.write().map_err(|_| StoreError::Persistence {
            message: "Failed to acquire write lock".to_string(),
        })
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn select(&self, filter: &ProfileFilter) -> Result<Vec<Profile>, StoreError> {
        let profiles = self.read_lock()?;
        Ok(profiles
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Profile>, StoreError> {
        let profiles = self.read_lock()?;
        Ok(profiles.get(&normalize_email(email)).cloned())
    }

    fn insert(&mut self, profile: Profile) -> Result<(), StoreError> {
        let mut profiles = self.write_lock()?;
        let key = normalize_email(&profile.email);
        if profiles.contains_key(&key) {
            return Err(StoreError::Duplicate {
                email: profile.email,
            });
        }
        profiles.insert(key, profile);
        Ok(())
    }

    fn update_role(&mut self, email: &str, role: Role) -> Result<Profile, StoreError> {
        let mut profiles = self.write_lock()?;
        let profile = profiles
            .get_mut(&normalize_email(email))
            .ok_or_else(|| StoreError::NotFound {
                email: email.to_string(),
            })?;
        profile.role = role.as_str().to_string();
        Ok(profile.clone())
    }

    fn delete(&mut self, email: &str) -> Result<Profile, StoreError> {
        let mut profiles = self.write_lock()?;
        profiles
            .remove(&normalize_email(email))
            .ok_or_else(|| StoreError::NotFound {
                email: email.to_string(),
            })
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read_lock()?.len())
    }
}
