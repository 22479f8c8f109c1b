//! Error types for hearth-pin.

use thiserror::Error;

/// Common error type for PIN authentication operations.
///
/// Only storage-class failures escape the services as errors; wrong PINs,
/// lockouts, and denied resets are named result variants instead
/// (`VerificationResult`, `ResetResult`).
#[derive(Error, Debug)]
pub enum HearthPinError {
    /// Storage error.
    ///
    /// Generic persistence failure from whatever backend implements
    /// `ProfileStore`.
    #[error("storage error: {0}")]
    Storage(String),

    /// Concurrent update conflict on a profile record.
    ///
    /// Raised by `ProfileStore::update` when the caller's expected version
    /// is stale. Services retry on this; it surfaces only when retries are
    /// exhausted.
    #[error("update conflict on profile {0}")]
    Conflict(i64),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// PIN hashing failed.
    #[error("PIN hashing failed: {0}")]
    Hash(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for hearth-pin operations.
pub type Result<T> = std::result::Result<T, HearthPinError>;
