//! Store abstraction for profile records.
//!
//! The persistence engine is a collaborator, not part of this crate; this
//! trait is the contract it must satisfy. The key requirement is the
//! optimistic-concurrency precondition on `update`: the lockout counters
//! are read-modify-write state, and a last-write-wins update would let two
//! concurrent wrong-PIN submissions both observe the same attempt count and
//! silently skip the lockout threshold.

use crate::store::{Profile, ProfileUpdate};
use crate::Result;

/// Contract for profile lookup and atomic conditional update.
///
/// Implementations must apply all set fields of a `ProfileUpdate` as a
/// single atomic write, guarded by the record version the caller observed:
/// if the stored version differs from `expected_version`, the update must
/// fail with `HearthPinError::Conflict` and leave the record untouched.
/// A successful update bumps the version.
pub trait ProfileStore: Send + Sync {
    /// Look up a profile by ID.
    fn find_by_id(&self, id: i64) -> Result<Option<Profile>>;

    /// Conditionally update a profile.
    ///
    /// Returns the updated record. Fails with `Conflict` when
    /// `expected_version` is stale and `NotFound` when the profile does
    /// not exist.
    fn update(&self, id: i64, expected_version: u64, update: &ProfileUpdate) -> Result<Profile>;
}
