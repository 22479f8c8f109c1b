//! Failed-attempt lockout policy.
//!
//! Pure state machine over `(state, now)`: the policy never reads a clock,
//! so every transition is deterministic under test. The state itself lives
//! on the profile record and is persisted by the services.

use chrono::{DateTime, Duration, Utc};

/// Maximum failed PIN attempts before lockout.
pub const MAX_PIN_ATTEMPTS: u32 = 5;

/// Lockout duration in seconds (15 minutes).
pub const LOCKOUT_DURATION_SECS: i64 = 15 * 60;

/// Lockout bookkeeping attached to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockoutState {
    /// Consecutive failed attempts.
    pub failed_attempts: u32,
    /// Lockout expiry, if a lockout is in effect or has elapsed unreset.
    pub locked_until: Option<DateTime<Utc>>,
}

/// Policy computing lockout transitions.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    /// Failures that trigger a lockout.
    max_attempts: u32,
    /// How long a lockout lasts.
    lockout_duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl LockoutPolicy {
    /// Create a policy with the default threshold and duration.
    pub fn new() -> Self {
        Self::with_config(MAX_PIN_ATTEMPTS, LOCKOUT_DURATION_SECS)
    }

    /// Create a policy with custom settings.
    pub fn with_config(max_attempts: u32, lockout_secs: i64) -> Self {
        Self {
            max_attempts,
            lockout_duration: Duration::seconds(lockout_secs),
        }
    }

    /// The configured failure threshold.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Check whether the state is locked at `now`.
    pub fn is_locked(&self, state: &LockoutState, now: DateTime<Utc>) -> bool {
        state.locked_until.is_some_and(|until| until > now)
    }

    /// Transition for a failed attempt.
    ///
    /// Increments the counter; when the new count reaches the threshold the
    /// lockout expiry is set to `now + lockout_duration`, otherwise any
    /// existing expiry is left as is.
    pub fn on_failure(&self, state: &LockoutState, now: DateTime<Utc>) -> LockoutState {
        let failed_attempts = state.failed_attempts.saturating_add(1);
        let locked_until = if failed_attempts >= self.max_attempts {
            Some(now + self.lockout_duration)
        } else {
            state.locked_until
        };
        LockoutState {
            failed_attempts,
            locked_until,
        }
    }

    /// Transition for a successful attempt: counter zeroed, lockout cleared.
    pub fn on_success(&self, _state: &LockoutState) -> LockoutState {
        LockoutState {
            failed_attempts: 0,
            locked_until: None,
        }
    }
}
