//! hearth-pin - Profile PIN authentication for the Hearth family dashboard.
//!
//! Per-profile 4-6 digit PINs protected by a salted one-way hash, guarded
//! by a failed-attempt counter with time-based lockout, and recoverable
//! through admin-mediated reset: any admin may reset any standard profile's
//! PIN and their own, never another admin's.

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod web;

pub use auth::{
    can_reset, validate_pin, Argon2PinHasher, DenyReason, LockoutPolicy, LockoutState,
    PinFormatError, PinHasher, PinResetService, PinVerificationService, ResetDecision,
    ResetResult, VerificationResult, LOCKOUT_DURATION_SECS, MAX_PIN_ATTEMPTS, MAX_PIN_LENGTH,
    MIN_PIN_LENGTH,
};
pub use config::Config;
pub use error::{HearthPinError, Result};
pub use store::{InMemoryProfileStore, NewProfile, Profile, ProfileStore, ProfileType, ProfileUpdate};
