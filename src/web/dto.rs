//! Request and response DTOs for the PIN boundary.

use serde::{Deserialize, Serialize};

use crate::web::error::ApiError;

/// PIN reset request body.
///
/// All fields are optional at the wire level so a missing field maps to the
/// required-fields error instead of a deserialization failure. The target
/// profile id comes from the request path, not the body.
#[derive(Debug, Default, Deserialize)]
pub struct ResetPinRequest {
    /// Acting admin's profile ID.
    #[serde(default)]
    pub admin_profile_id: Option<i64>,
    /// Acting admin's current PIN.
    #[serde(default)]
    pub admin_pin: Option<String>,
    /// New PIN for the target profile.
    #[serde(default)]
    pub new_pin: Option<String>,
}

impl ResetPinRequest {
    /// Extract the required fields or produce the missing-fields error.
    pub fn require(&self) -> Result<(i64, &str, &str), ApiError> {
        match (&self.admin_profile_id, &self.admin_pin, &self.new_pin) {
            (Some(id), Some(pin), Some(new_pin)) => Ok((*id, pin.as_str(), new_pin.as_str())),
            _ => Err(ApiError::bad_request(
                "Admin profile ID, admin PIN, and new PIN required",
            )),
        }
    }
}

/// PIN verification request body.
#[derive(Debug, Default, Deserialize)]
pub struct VerifyPinRequest {
    /// Candidate PIN.
    #[serde(default)]
    pub pin: Option<String>,
}

impl VerifyPinRequest {
    /// Extract the PIN or produce the missing-field error.
    pub fn require(&self) -> Result<&str, ApiError> {
        self.pin
            .as_deref()
            .ok_or_else(|| ApiError::bad_request("PIN required"))
    }
}

/// Success response body: `{ "success": true }`.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    /// Always true.
    pub success: bool,
}

impl SuccessResponse {
    /// Create the success body.
    pub fn new() -> Self {
        Self { success: true }
    }
}

impl Default for SuccessResponse {
    fn default() -> Self {
        Self::new()
    }
}
