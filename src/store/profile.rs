//! Profile model for hearth-pin.
//!
//! This module defines the Profile struct and ProfileType enum as seen by
//! the PIN-authentication subsystem. Profile creation and deletion belong
//! to profile management and are out of scope here; this subsystem only
//! mutates the PIN and lockout fields.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::LockoutState;

/// Profile type for authorization decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    /// Administrator: may reset PINs of standard profiles and itself.
    Admin,
    /// Standard profile: its PIN may be reset by any admin.
    #[default]
    Standard,
}

impl ProfileType {
    /// Convert to the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Admin => "admin",
            ProfileType::Standard => "standard",
        }
    }

    /// Check whether this type carries admin privileges.
    pub fn is_admin(&self) -> bool {
        matches!(self, ProfileType::Admin)
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProfileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(ProfileType::Admin),
            "standard" => Ok(ProfileType::Standard),
            _ => Err(format!("unknown profile type: {s}")),
        }
    }
}

/// A dashboard profile as seen by PIN authentication.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Unique profile ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Profile type for authorization.
    pub profile_type: ProfileType,
    /// PIN hash (PHC string); `None` means no PIN configured.
    pub pin_hash: Option<String>,
    /// Whether PIN checks apply to this profile at all.
    pub pin_enabled: bool,
    /// Consecutive failed PIN attempts.
    pub failed_pin_attempts: u32,
    /// Lockout expiry; the profile is locked while this is in the future.
    pub pin_locked_until: Option<DateTime<Utc>>,
    /// Profile creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Record version for optimistic concurrency control.
    pub version: u64,
}

impl Profile {
    /// Check whether this profile is an administrator.
    pub fn is_admin(&self) -> bool {
        self.profile_type.is_admin()
    }

    /// Check whether a PIN is configured and enforced.
    pub fn pin_configured(&self) -> bool {
        self.pin_enabled && self.pin_hash.is_some()
    }

    /// Extract the lockout fields as a policy state.
    pub fn lockout_state(&self) -> LockoutState {
        LockoutState {
            failed_attempts: self.failed_pin_attempts,
            locked_until: self.pin_locked_until,
        }
    }
}

/// Data for creating a new profile.
///
/// New profiles start with no PIN: `pin_enabled = false`, no hash, a zero
/// attempt counter, and no lockout.
#[derive(Debug, Clone)]
pub struct NewProfile {
    /// Display name.
    pub name: String,
    /// Profile type.
    pub profile_type: ProfileType,
}

impl NewProfile {
    /// Create profile data with the given name and type.
    pub fn new(name: impl Into<String>, profile_type: ProfileType) -> Self {
        Self {
            name: name.into(),
            profile_type,
        }
    }
}

/// Partial update of the PIN and lockout fields.
///
/// Only the fields this subsystem owns are updatable. Fields left as `None`
/// keep their stored value; the store applies all set fields atomically.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New PIN hash (`Some(None)` clears the hash).
    pub pin_hash: Option<Option<String>>,
    /// New `pin_enabled` flag.
    pub pin_enabled: Option<bool>,
    /// New failed-attempt count.
    pub failed_pin_attempts: Option<u32>,
    /// New lockout expiry (`Some(None)` clears the lockout).
    pub pin_locked_until: Option<Option<DateTime<Utc>>>,
}

impl ProfileUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the PIN hash.
    pub fn pin_hash(mut self, hash: Option<String>) -> Self {
        self.pin_hash = Some(hash);
        self
    }

    /// Set the `pin_enabled` flag.
    pub fn pin_enabled(mut self, enabled: bool) -> Self {
        self.pin_enabled = Some(enabled);
        self
    }

    /// Set the failed-attempt count.
    pub fn failed_pin_attempts(mut self, count: u32) -> Self {
        self.failed_pin_attempts = Some(count);
        self
    }

    /// Set the lockout expiry.
    pub fn pin_locked_until(mut self, until: Option<DateTime<Utc>>) -> Self {
        self.pin_locked_until = Some(until);
        self
    }

    /// Build the update a lockout transition produces.
    pub fn from_lockout_state(state: &LockoutState) -> Self {
        Self::new()
            .failed_pin_attempts(state.failed_attempts)
            .pin_locked_until(state.locked_until)
    }

    /// Check whether the update changes anything.
    pub fn is_empty(&self) -> bool {
        self.pin_hash.is_none()
            && self.pin_enabled.is_none()
            && self.failed_pin_attempts.is_none()
            && self.pin_locked_until.is_none()
    }
}
