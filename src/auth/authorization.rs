//! Authorization policy for PIN resets.
//!
//! Pure decision over the acting and target profiles: any admin may reset
//! any standard profile's PIN and their own, but never another admin's.
//! Whether the actor has proven knowledge of their own PIN is the reset
//! service's job, not this policy's.

use crate::store::Profile;

/// Why a reset was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The acting profile is not an administrator.
    NotAdmin,
    /// The target is a different administrator.
    TargetIsAdmin,
}

impl DenyReason {
    /// The stable message for this denial.
    pub fn message(&self) -> &'static str {
        match self {
            DenyReason::NotAdmin => "not admin",
            DenyReason::TargetIsAdmin => "cannot reset another admin's PIN",
        }
    }
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Outcome of the reset authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetDecision {
    /// The reset is structurally permitted.
    Allowed,
    /// The reset is forbidden; retrying cannot help, a different actor can.
    Denied(DenyReason),
}

impl ResetDecision {
    /// Check whether the reset is permitted.
    pub fn is_allowed(&self) -> bool {
        matches!(self, ResetDecision::Allowed)
    }
}

/// Decide whether `acting_admin` may reset `target`'s PIN.
///
/// The decision depends only on profile types and identity; it holds for
/// any number of admin profiles acting concurrently.
pub fn can_reset(acting_admin: &Profile, target: &Profile) -> ResetDecision {
    if !acting_admin.is_admin() {
        return ResetDecision::Denied(DenyReason::NotAdmin);
    }
    if acting_admin.id == target.id {
        // Self-reset: always structurally allowed, gated by the actor's own
        // PIN proof upstream.
        return ResetDecision::Allowed;
    }
    if target.is_admin() {
        return ResetDecision::Denied(DenyReason::TargetIsAdmin);
    }
    ResetDecision::Allowed
}
