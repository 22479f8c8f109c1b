//! Shared fixtures for integration tests.
//!
//! Provides a deterministic fake hasher, service harnesses, and profile
//! seeding helpers.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hearth_pin::{
    Argon2PinHasher, InMemoryProfileStore, LockoutPolicy, NewProfile, PinHasher, PinResetService,
    PinVerificationService, ProfileStore, ProfileType, ProfileUpdate, Result,
};

/// Deterministic hasher that counts calls; hashes are `fake$<pin>`.
#[derive(Default)]
pub struct FakeHasher {
    hash_calls: AtomicUsize,
    verify_calls: AtomicUsize,
}

impl FakeHasher {
    pub fn hash_count(&self) -> usize {
        self.hash_calls.load(Ordering::SeqCst)
    }

    pub fn verify_count(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

impl PinHasher for FakeHasher {
    fn hash(&self, pin: &str) -> Result<String> {
        self.hash_calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("fake${pin}"))
    }

    fn verify(&self, pin: &str, hash: &str) -> bool {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        hash == format!("fake${pin}")
    }
}

/// Harness wired with the fake hasher.
pub struct Harness {
    pub store: Arc<InMemoryProfileStore>,
    pub hasher: Arc<FakeHasher>,
    pub verifier: PinVerificationService<InMemoryProfileStore, FakeHasher>,
    pub reset: PinResetService<InMemoryProfileStore, FakeHasher>,
}

pub fn harness() -> Harness {
    harness_with_policy(LockoutPolicy::new())
}

pub fn harness_with_policy(policy: LockoutPolicy) -> Harness {
    let store = Arc::new(InMemoryProfileStore::new());
    let hasher = Arc::new(FakeHasher::default());
    let verifier = PinVerificationService::new(store.clone(), hasher.clone(), policy);
    let reset = PinResetService::new(
        store.clone(),
        hasher.clone(),
        PinVerificationService::new(store.clone(), hasher.clone(), policy),
    );
    Harness {
        store,
        hasher,
        verifier,
        reset,
    }
}

/// Harness wired with the real Argon2 hasher.
pub struct ArgonHarness {
    pub store: Arc<InMemoryProfileStore>,
    pub hasher: Arc<Argon2PinHasher>,
    pub verifier: PinVerificationService<InMemoryProfileStore, Argon2PinHasher>,
    pub reset: PinResetService<InMemoryProfileStore, Argon2PinHasher>,
}

pub fn argon_harness() -> ArgonHarness {
    let store = Arc::new(InMemoryProfileStore::new());
    let hasher = Arc::new(Argon2PinHasher::new());
    let policy = LockoutPolicy::new();
    let verifier = PinVerificationService::new(store.clone(), hasher.clone(), policy);
    let reset = PinResetService::new(
        store.clone(),
        hasher.clone(),
        PinVerificationService::new(store.clone(), hasher.clone(), policy),
    );
    ArgonHarness {
        store,
        hasher,
        verifier,
        reset,
    }
}

/// Insert a profile, optionally with a PIN hashed by the given hasher.
pub fn seed_profile<H: PinHasher>(
    store: &InMemoryProfileStore,
    hasher: &H,
    name: &str,
    profile_type: ProfileType,
    pin: Option<&str>,
) -> i64 {
    let profile = store.insert(NewProfile::new(name, profile_type));
    if let Some(pin) = pin {
        let hash = hasher.hash(pin).unwrap();
        store
            .update(
                profile.id,
                profile.version,
                &ProfileUpdate::new().pin_hash(Some(hash)).pin_enabled(true),
            )
            .unwrap();
    }
    profile.id
}
