//! PIN format validation.
//!
//! A PIN is a string of exactly 4 to 6 ASCII digits. Anything else,
//! including non-ASCII digit characters, is rejected before any profile
//! lookup or hashing happens.

use thiserror::Error;

/// Minimum PIN length.
pub const MIN_PIN_LENGTH: usize = 4;

/// Maximum PIN length.
pub const MAX_PIN_LENGTH: usize = 6;

/// PIN format errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinFormatError {
    /// PIN is too short.
    #[error("PIN must be at least {MIN_PIN_LENGTH} digits")]
    TooShort,

    /// PIN is too long.
    #[error("PIN must be at most {MAX_PIN_LENGTH} digits")]
    TooLong,

    /// PIN contains non-digit characters.
    #[error("PIN can only contain digits 0-9")]
    InvalidChars,
}

/// Validate PIN format: 4-6 characters, every one an ASCII digit.
pub fn validate_pin(pin: &str) -> Result<(), PinFormatError> {
    // Length in bytes: multi-byte characters fail the digit check anyway.
    if pin.len() < MIN_PIN_LENGTH {
        return Err(PinFormatError::TooShort);
    }
    if pin.len() > MAX_PIN_LENGTH {
        return Err(PinFormatError::TooLong);
    }
    if !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(PinFormatError::InvalidChars);
    }
    Ok(())
}
