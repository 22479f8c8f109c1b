//! PIN hashing for hearth-pin.
//!
//! Uses Argon2id for one-way, salted PIN hashing. The hasher is behind a
//! trait so services can be tested with injected fakes.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;

use crate::{HearthPinError, Result};

/// One-way salted PIN hashing.
///
/// `hash` produces a PHC-formatted string; hashing the same PIN twice
/// yields different strings (random salt), comparable only via `verify`.
/// `verify` never errors: a malformed stored hash is an ordinary mismatch.
pub trait PinHasher: Send + Sync {
    /// Hash a PIN into a PHC string.
    fn hash(&self, pin: &str) -> Result<String>;

    /// Verify a candidate PIN against a stored hash.
    fn verify(&self, pin: &str, hash: &str) -> bool;
}

/// Create the Argon2 hasher with interactive-login parameters.
///
/// Parameters (OWASP interactive profile):
/// - Memory cost: 19 MiB (19456 KiB)
/// - Time cost: 2 iterations
/// - Parallelism: 1 thread
fn create_argon2() -> Argon2<'static> {
    let m_cost = 19456;
    let t_cost = 2;
    let p_cost = 1;

    let params = Params::new(m_cost, t_cost, p_cost, None).expect("valid Argon2 params");
    Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
}

/// Argon2id-backed `PinHasher`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PinHasher;

impl Argon2PinHasher {
    /// Create the hasher.
    pub fn new() -> Self {
        Self
    }
}

impl PinHasher for Argon2PinHasher {
    fn hash(&self, pin: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = create_argon2();
        let hash = argon2
            .hash_password(pin.as_bytes(), &salt)
            .map_err(|e| HearthPinError::Hash(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, pin: &str, hash: &str) -> bool {
        // The parameters come from the parsed hash, not from create_argon2(),
        // so hashes written under older cost settings keep verifying.
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(pin.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
