//! In-memory profile store.
//!
//! Reference implementation of the `ProfileStore` contract, backed by a
//! `RwLock<HashMap>`. Serves as the test store and as a working backend for
//! single-process deployments.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use chrono::Utc;

use crate::store::{NewProfile, Profile, ProfileStore, ProfileUpdate};
use crate::{HearthPinError, Result};

/// Thread-safe in-memory profile store with versioned updates.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    /// Profiles by ID.
    profiles: RwLock<HashMap<i64, Profile>>,
    /// Next ID to assign.
    next_id: AtomicI64,
}

impl InMemoryProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Insert a new profile with no PIN configured.
    pub fn insert(&self, new_profile: NewProfile) -> Profile {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let profile = Profile {
            id,
            name: new_profile.name,
            profile_type: new_profile.profile_type,
            pin_hash: None,
            pin_enabled: false,
            failed_pin_attempts: 0,
            pin_locked_until: None,
            created_at: Utc::now(),
            version: 1,
        };
        let mut profiles = self.profiles.write().unwrap();
        profiles.insert(id, profile.clone());
        profile
    }

    /// Number of stored profiles.
    pub fn count(&self) -> usize {
        self.profiles.read().unwrap().len()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn find_by_id(&self, id: i64) -> Result<Option<Profile>> {
        let profiles = self.profiles.read().unwrap();
        Ok(profiles.get(&id).cloned())
    }

    fn update(&self, id: i64, expected_version: u64, update: &ProfileUpdate) -> Result<Profile> {
        let mut profiles = self.profiles.write().unwrap();
        let profile = profiles
            .get_mut(&id)
            .ok_or_else(|| HearthPinError::NotFound(format!("profile {id}")))?;

        if profile.version != expected_version {
            return Err(HearthPinError::Conflict(id));
        }

        if let Some(ref hash) = update.pin_hash {
            profile.pin_hash = hash.clone();
        }
        if let Some(enabled) = update.pin_enabled {
            profile.pin_enabled = enabled;
        }
        if let Some(count) = update.failed_pin_attempts {
            profile.failed_pin_attempts = count;
        }
        if let Some(until) = update.pin_locked_until {
            profile.pin_locked_until = until;
        }
        profile.version += 1;

        Ok(profile.clone())
    }
}
