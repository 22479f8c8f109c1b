//! Admin-mediated PIN reset service.
//!
//! Performs the full reset protocol in a fixed order, each step
//! short-circuiting: new-PIN format first (no store reads for a malformed
//! request), then admin lookup and type check (a malformed admin id never
//! reaches a hash comparison), then the admin's own PIN proof (which
//! participates in the admin's own lockout bookkeeping), and only then the
//! target lookup and authorization, so admin profiles cannot be probed
//! without authenticating first.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::auth::{
    can_reset, validate_pin, DenyReason, PinHasher, PinVerificationService, ResetDecision,
    VerificationResult,
};
use crate::store::{Profile, ProfileStore, ProfileUpdate};
use crate::{HearthPinError, Result};

/// Commit retries before giving up under contention.
const MAX_COMMIT_RETRIES: u32 = 16;

/// Outcome of a PIN reset request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetResult {
    /// The target's PIN was replaced and its lockout cleared.
    Success,
    /// No profile exists with the acting admin's id.
    AdminNotFound,
    /// The acting profile is not an administrator.
    NotAdmin,
    /// The acting admin failed to prove knowledge of their own PIN.
    AdminPinIncorrect,
    /// The acting admin's own profile is locked; reauthentication must wait.
    AdminLocked(DateTime<Utc>),
    /// No profile exists with the target id.
    TargetNotFound,
    /// Structurally forbidden; retrying cannot help.
    Forbidden(DenyReason),
    /// The new PIN is not 4-6 ASCII digits.
    InvalidNewPin,
}

/// Service performing authorized PIN resets.
pub struct PinResetService<S, H> {
    store: Arc<S>,
    hasher: Arc<H>,
    verification: PinVerificationService<S, H>,
}

impl<S: ProfileStore, H: PinHasher> PinResetService<S, H> {
    /// Create the service.
    pub fn new(
        store: Arc<S>,
        hasher: Arc<H>,
        verification: PinVerificationService<S, H>,
    ) -> Self {
        Self {
            store,
            hasher,
            verification,
        }
    }

    /// Reset `target_profile_id`'s PIN to `new_pin` on behalf of an admin.
    ///
    /// The acting admin must prove knowledge of their current PIN; a wrong
    /// PIN here counts toward the admin's own lockout. On success the
    /// target's hash is replaced, `pin_enabled` set, and its attempt
    /// counter and lockout cleared in one atomic update.
    pub fn reset(
        &self,
        acting_admin_id: i64,
        acting_admin_pin: &str,
        target_profile_id: i64,
        new_pin: &str,
        now: DateTime<Utc>,
    ) -> Result<ResetResult> {
        if validate_pin(new_pin).is_err() {
            return Ok(ResetResult::InvalidNewPin);
        }

        let Some(admin) = self.store.find_by_id(acting_admin_id)? else {
            return Ok(ResetResult::AdminNotFound);
        };

        if !admin.is_admin() {
            warn!(
                acting_profile_id = acting_admin_id,
                "PIN reset refused: acting profile is not an admin"
            );
            return Ok(ResetResult::NotAdmin);
        }

        match self.verification.verify(admin.id, acting_admin_pin, now)? {
            VerificationResult::Success => {}
            VerificationResult::Locked(until) => {
                warn!(
                    acting_admin_id,
                    %until,
                    "PIN reset refused: admin profile locked"
                );
                return Ok(ResetResult::AdminLocked(until));
            }
            // An admin without a configured PIN cannot prove their
            // identity; the response must not disclose which case it was.
            VerificationResult::IncorrectPin | VerificationResult::NotConfigured => {
                return Ok(ResetResult::AdminPinIncorrect);
            }
        }

        let Some(target) = self.store.find_by_id(target_profile_id)? else {
            return Ok(ResetResult::TargetNotFound);
        };

        if let ResetDecision::Denied(reason) = can_reset(&admin, &target) {
            warn!(
                acting_admin_id,
                target_profile_id,
                reason = %reason,
                "PIN reset forbidden"
            );
            return Ok(ResetResult::Forbidden(reason));
        }

        let hash = self.hasher.hash(new_pin)?;
        self.commit(target, hash, acting_admin_id)
    }

    /// Commit the new hash to the target, retrying on version conflicts.
    fn commit(&self, mut target: Profile, hash: String, acting_admin_id: i64) -> Result<ResetResult> {
        let target_id = target.id;
        for _ in 0..MAX_COMMIT_RETRIES {
            let update = ProfileUpdate::new()
                .pin_hash(Some(hash.clone()))
                .pin_enabled(true)
                .failed_pin_attempts(0)
                .pin_locked_until(None);

            match self.store.update(target.id, target.version, &update) {
                Ok(_) => {
                    info!(acting_admin_id, target_profile_id = target_id, "PIN reset");
                    return Ok(ResetResult::Success);
                }
                Err(HearthPinError::Conflict(_)) => {
                    match self.store.find_by_id(target_id)? {
                        Some(fresh) => target = fresh,
                        None => return Ok(ResetResult::TargetNotFound),
                    }
                }
                Err(HearthPinError::NotFound(_)) => return Ok(ResetResult::TargetNotFound),
                Err(e) => return Err(e),
            }
        }

        Err(HearthPinError::Conflict(target_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::LockoutPolicy;
    use crate::store::{InMemoryProfileStore, NewProfile, ProfileType};
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic hasher; hashes are `fake$<pin>`.
    #[derive(Default)]
    struct FakeHasher;

    impl PinHasher for FakeHasher {
        fn hash(&self, pin: &str) -> Result<String> {
            Ok(format!("fake${pin}"))
        }

        fn verify(&self, pin: &str, hash: &str) -> bool {
            hash == format!("fake${pin}")
        }
    }

    /// Store wrapper counting calls.
    struct CountingStore {
        inner: InMemoryProfileStore,
        finds: AtomicUsize,
        updates: AtomicUsize,
    }

    impl CountingStore {
        fn new() -> Self {
            Self {
                inner: InMemoryProfileStore::new(),
                finds: AtomicUsize::new(0),
                updates: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.finds.load(Ordering::SeqCst) + self.updates.load(Ordering::SeqCst)
        }
    }

    impl ProfileStore for CountingStore {
        fn find_by_id(&self, id: i64) -> Result<Option<Profile>> {
            self.finds.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_id(id)
        }

        fn update(&self, id: i64, expected_version: u64, update: &ProfileUpdate) -> Result<Profile> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            self.inner.update(id, expected_version, update)
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    struct Fixture {
        store: Arc<CountingStore>,
        service: PinResetService<CountingStore, FakeHasher>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(CountingStore::new());
        let hasher = Arc::new(FakeHasher);
        let verification =
            PinVerificationService::new(store.clone(), hasher.clone(), LockoutPolicy::new());
        let service = PinResetService::new(store.clone(), hasher, verification);
        Fixture { store, service }
    }

    fn seed(fx: &Fixture, profile_type: ProfileType, pin: Option<&str>) -> i64 {
        let profile = fx.store.inner.insert(NewProfile::new("p", profile_type));
        if let Some(pin) = pin {
            fx.store
                .inner
                .update(
                    profile.id,
                    profile.version,
                    &ProfileUpdate::new()
                        .pin_hash(Some(format!("fake${pin}")))
                        .pin_enabled(true),
                )
                .unwrap();
        }
        profile.id
    }

    #[test]
    fn test_reset_standard_profile_succeeds() {
        let fx = fixture();
        let admin = seed(&fx, ProfileType::Admin, Some("1234"));
        let target = seed(&fx, ProfileType::Standard, None);

        let result = fx.service.reset(admin, "1234", target, "5678", t0()).unwrap();
        assert_eq!(result, ResetResult::Success);

        let profile = fx.store.inner.find_by_id(target).unwrap().unwrap();
        assert!(profile.pin_enabled);
        assert_eq!(profile.pin_hash.as_deref(), Some("fake$5678"));
        assert_eq!(profile.failed_pin_attempts, 0);
        assert!(profile.pin_locked_until.is_none());
    }

    #[test]
    fn test_reset_clears_target_lockout() {
        let fx = fixture();
        let admin = seed(&fx, ProfileType::Admin, Some("1234"));
        let target = seed(&fx, ProfileType::Standard, Some("9999"));
        let current = fx.store.inner.find_by_id(target).unwrap().unwrap();
        fx.store
            .inner
            .update(
                target,
                current.version,
                &ProfileUpdate::new()
                    .failed_pin_attempts(5)
                    .pin_locked_until(Some(t0() + Duration::minutes(10))),
            )
            .unwrap();

        let result = fx.service.reset(admin, "1234", target, "5678", t0()).unwrap();
        assert_eq!(result, ResetResult::Success);

        let profile = fx.store.inner.find_by_id(target).unwrap().unwrap();
        assert_eq!(profile.failed_pin_attempts, 0);
        assert!(profile.pin_locked_until.is_none());
    }

    #[test]
    fn test_admin_self_reset() {
        let fx = fixture();
        let admin = seed(&fx, ProfileType::Admin, Some("1234"));

        let result = fx.service.reset(admin, "1234", admin, "4321", t0()).unwrap();
        assert_eq!(result, ResetResult::Success);

        let profile = fx.store.inner.find_by_id(admin).unwrap().unwrap();
        assert_eq!(profile.pin_hash.as_deref(), Some("fake$4321"));
    }

    #[test]
    fn test_invalid_new_pin_short_circuits_before_lookups() {
        let fx = fixture();
        let admin = seed(&fx, ProfileType::Admin, Some("1234"));
        let target = seed(&fx, ProfileType::Standard, None);
        let calls_before = fx.store.call_count();

        for bad in ["123", "1234567", "12a4", ""] {
            let result = fx.service.reset(admin, "1234", target, bad, t0()).unwrap();
            assert_eq!(result, ResetResult::InvalidNewPin);
        }
        assert_eq!(fx.store.call_count(), calls_before);
    }

    #[test]
    fn test_admin_not_found() {
        let fx = fixture();
        let target = seed(&fx, ProfileType::Standard, None);

        let result = fx.service.reset(404, "1234", target, "5678", t0()).unwrap();
        assert_eq!(result, ResetResult::AdminNotFound);
    }

    #[test]
    fn test_standard_actor_rejected_before_pin_check() {
        let fx = fixture();
        let actor = seed(&fx, ProfileType::Standard, Some("1234"));
        let target = seed(&fx, ProfileType::Standard, None);

        let result = fx.service.reset(actor, "1234", target, "5678", t0()).unwrap();
        assert_eq!(result, ResetResult::NotAdmin);

        // The actor's lockout bookkeeping must be untouched.
        let profile = fx.store.inner.find_by_id(actor).unwrap().unwrap();
        assert_eq!(profile.failed_pin_attempts, 0);
    }

    #[test]
    fn test_wrong_admin_pin_counts_toward_admin_lockout() {
        let fx = fixture();
        let admin = seed(&fx, ProfileType::Admin, Some("1234"));
        let target = seed(&fx, ProfileType::Standard, None);

        let result = fx.service.reset(admin, "9999", target, "5678", t0()).unwrap();
        assert_eq!(result, ResetResult::AdminPinIncorrect);

        let profile = fx.store.inner.find_by_id(admin).unwrap().unwrap();
        assert_eq!(profile.failed_pin_attempts, 1);

        // Target untouched.
        let profile = fx.store.inner.find_by_id(target).unwrap().unwrap();
        assert!(profile.pin_hash.is_none());
    }

    #[test]
    fn test_locked_admin_gets_locked_signal_not_incorrect() {
        let fx = fixture();
        let admin = seed(&fx, ProfileType::Admin, Some("1234"));
        let target = seed(&fx, ProfileType::Standard, None);

        for _ in 0..5 {
            fx.service.reset(admin, "9999", target, "5678", t0()).unwrap();
        }

        // Even the correct admin PIN is refused while locked.
        let result = fx.service.reset(admin, "1234", target, "5678", t0()).unwrap();
        assert_eq!(
            result,
            ResetResult::AdminLocked(t0() + Duration::minutes(15))
        );
    }

    #[test]
    fn test_admin_without_pin_cannot_reset() {
        let fx = fixture();
        let admin = seed(&fx, ProfileType::Admin, None);
        let target = seed(&fx, ProfileType::Standard, None);

        let result = fx.service.reset(admin, "1234", target, "5678", t0()).unwrap();
        assert_eq!(result, ResetResult::AdminPinIncorrect);
    }

    #[test]
    fn test_target_not_found_after_admin_proof() {
        let fx = fixture();
        let admin = seed(&fx, ProfileType::Admin, Some("1234"));

        let result = fx.service.reset(admin, "1234", 404, "5678", t0()).unwrap();
        assert_eq!(result, ResetResult::TargetNotFound);
    }

    #[test]
    fn test_cannot_reset_another_admin() {
        let fx = fixture();
        let admin_a = seed(&fx, ProfileType::Admin, Some("1234"));
        let admin_b = seed(&fx, ProfileType::Admin, Some("5555"));

        let result = fx
            .service
            .reset(admin_a, "1234", admin_b, "5678", t0())
            .unwrap();
        assert_eq!(result, ResetResult::Forbidden(DenyReason::TargetIsAdmin));

        // B's stored hash is unchanged.
        let profile = fx.store.inner.find_by_id(admin_b).unwrap().unwrap();
        assert_eq!(profile.pin_hash.as_deref(), Some("fake$5555"));
    }

    #[test]
    fn test_every_admin_can_reset_standard_but_not_each_other() {
        let fx = fixture();
        let admins: Vec<_> = (0..3)
            .map(|_| seed(&fx, ProfileType::Admin, Some("1234")))
            .collect();
        let target = seed(&fx, ProfileType::Standard, None);

        for &a in &admins {
            assert_eq!(
                fx.service.reset(a, "1234", target, "5678", t0()).unwrap(),
                ResetResult::Success
            );
            for &b in &admins {
                if a != b {
                    assert_eq!(
                        fx.service.reset(a, "1234", b, "5678", t0()).unwrap(),
                        ResetResult::Forbidden(DenyReason::TargetIsAdmin)
                    );
                }
            }
        }
    }

    #[test]
    fn test_successful_reset_allows_new_pin_login() {
        let fx = fixture();
        let admin = seed(&fx, ProfileType::Admin, Some("1234"));
        let target = seed(&fx, ProfileType::Standard, Some("0000"));

        fx.service.reset(admin, "1234", target, "5678", t0()).unwrap();

        let store = fx.store.clone();
        let verification = PinVerificationService::new(
            store.clone(),
            Arc::new(FakeHasher),
            LockoutPolicy::new(),
        );
        assert_eq!(
            verification.verify(target, "5678", t0()).unwrap(),
            VerificationResult::Success
        );
        assert_eq!(
            verification.verify(target, "0000", t0()).unwrap(),
            VerificationResult::IncorrectPin
        );
    }
}
