//! PIN verification service.
//!
//! Answers "is this PIN correct for this profile right now" and records the
//! outcome: a success zeroes the failed-attempt counter and clears any
//! lockout, a failure increments the counter and may set one. Counter
//! updates are committed with the version observed at read time and the
//! whole decision is recomputed on conflict, so concurrent attempts against
//! the same profile never lose an increment.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::auth::{LockoutPolicy, PinHasher};
use crate::store::{ProfileStore, ProfileUpdate};
use crate::{HearthPinError, Result};

/// Commit retries before giving up under contention.
const MAX_COMMIT_RETRIES: u32 = 16;

/// Outcome of a PIN verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationResult {
    /// PIN matched; counters were reset.
    Success,
    /// PIN did not match; the failure was recorded.
    IncorrectPin,
    /// Profile is locked until the contained time; no comparison was made.
    Locked(DateTime<Utc>),
    /// The profile has PIN checks disabled or no hash stored.
    NotConfigured,
}

/// Service orchestrating store, hasher, and lockout policy.
pub struct PinVerificationService<S, H> {
    store: Arc<S>,
    hasher: Arc<H>,
    policy: LockoutPolicy,
}

impl<S: ProfileStore, H: PinHasher> PinVerificationService<S, H> {
    /// Create the service.
    pub fn new(store: Arc<S>, hasher: Arc<H>, policy: LockoutPolicy) -> Self {
        Self {
            store,
            hasher,
            policy,
        }
    }

    /// The lockout policy in effect.
    pub fn policy(&self) -> &LockoutPolicy {
        &self.policy
    }

    /// Verify a candidate PIN against a profile at time `now`.
    ///
    /// Every call mutates the persisted lockout state except when the
    /// profile has no PIN configured. Locked profiles are refused before
    /// any hash comparison. A missing profile is a storage-level error, not
    /// a verification outcome.
    pub fn verify(
        &self,
        profile_id: i64,
        candidate_pin: &str,
        now: DateTime<Utc>,
    ) -> Result<VerificationResult> {
        for _ in 0..MAX_COMMIT_RETRIES {
            let profile = self
                .store
                .find_by_id(profile_id)?
                .ok_or_else(|| HearthPinError::NotFound(format!("profile {profile_id}")))?;

            let Some(hash) = profile.pin_hash.as_deref().filter(|_| profile.pin_enabled) else {
                // Burn an equivalent hash computation so response timing
                // does not reveal which profiles have no PIN set.
                let _ = self.hasher.hash(candidate_pin);
                return Ok(VerificationResult::NotConfigured);
            };

            let state = profile.lockout_state();
            if let Some(until) = state.locked_until {
                if self.policy.is_locked(&state, now) {
                    debug!(profile_id, %until, "PIN check refused: profile locked");
                    return Ok(VerificationResult::Locked(until));
                }
            }

            let matched = self.hasher.verify(candidate_pin, hash);
            let next = if matched {
                self.policy.on_success(&state)
            } else {
                self.policy.on_failure(&state, now)
            };

            let update = ProfileUpdate::from_lockout_state(&next);
            match self.store.update(profile.id, profile.version, &update) {
                Ok(_) => {
                    return if matched {
                        info!(profile_id, "PIN verified");
                        Ok(VerificationResult::Success)
                    } else {
                        warn!(
                            profile_id,
                            failed_attempts = next.failed_attempts,
                            locked = next.locked_until.is_some(),
                            "PIN verification failed"
                        );
                        Ok(VerificationResult::IncorrectPin)
                    };
                }
                // Someone else committed first: redo the whole decision
                // from a fresh read.
                Err(HearthPinError::Conflict(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(HearthPinError::Conflict(profile_id))
    }
}
