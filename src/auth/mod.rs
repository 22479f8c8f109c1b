//! PIN authentication for hearth-pin.
//!
//! This module provides PIN hashing, the lockout and authorization
//! policies, and the verification and reset services that orchestrate them.

mod authorization;
mod hasher;
mod lockout;
mod reset;
mod verification;
pub mod validation;

pub use authorization::{can_reset, DenyReason, ResetDecision};
pub use hasher::{Argon2PinHasher, PinHasher};
pub use lockout::{LockoutPolicy, LockoutState, LOCKOUT_DURATION_SECS, MAX_PIN_ATTEMPTS};
pub use reset::{PinResetService, ResetResult};
pub use validation::{validate_pin, PinFormatError, MAX_PIN_LENGTH, MIN_PIN_LENGTH};
pub use verification::{PinVerificationService, VerificationResult};
