//! Boundary response mapping for the PIN subsystem.
//!
//! Route wiring and body parsing are the surrounding application's job;
//! this module provides the pieces a handler composes: request/response
//! DTOs and the fixed mapping from service outcomes to transport responses.
//! The reset mapping is a compatibility contract with existing clients;
//! the status codes and messages here must not drift.

pub mod dto;
pub mod error;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::auth::{DenyReason, ResetResult, VerificationResult};

pub use dto::{ResetPinRequest, SuccessResponse, VerifyPinRequest};
pub use error::{ApiError, ErrorBody, ErrorCode, ErrorDetail};

/// Map a reset outcome to its transport response.
pub fn reset_response(result: &ResetResult) -> Response {
    match result {
        ResetResult::Success => (StatusCode::OK, Json(SuccessResponse::new())).into_response(),
        ResetResult::InvalidNewPin => {
            ApiError::bad_request("New PIN must be 4-6 digits").into_response()
        }
        ResetResult::AdminNotFound => {
            ApiError::not_found("Admin profile not found").into_response()
        }
        ResetResult::NotAdmin => {
            ApiError::forbidden("Only admin profiles can reset PINs").into_response()
        }
        ResetResult::AdminPinIncorrect => {
            ApiError::unauthorized("Admin PIN is incorrect").into_response()
        }
        ResetResult::AdminLocked(_) => {
            ApiError::locked("Admin profile is locked. Try again later.").into_response()
        }
        ResetResult::TargetNotFound => {
            ApiError::not_found("Target profile not found").into_response()
        }
        ResetResult::Forbidden(DenyReason::TargetIsAdmin) => {
            ApiError::forbidden("Cannot reset another admin's PIN").into_response()
        }
        ResetResult::Forbidden(DenyReason::NotAdmin) => {
            ApiError::forbidden("Only admin profiles can reset PINs").into_response()
        }
    }
}

/// Response for a storage failure during reset. Internal details are
/// logged, never sent to the client.
pub fn reset_failure_response() -> Response {
    ApiError::internal("Failed to reset PIN").into_response()
}

/// Map a verification outcome to its transport response.
pub fn verify_response(result: &VerificationResult) -> Response {
    match result {
        VerificationResult::Success => {
            (StatusCode::OK, Json(SuccessResponse::new())).into_response()
        }
        VerificationResult::IncorrectPin => ApiError::unauthorized("Incorrect PIN").into_response(),
        VerificationResult::Locked(_) => {
            ApiError::locked("Profile is locked. Try again later.").into_response()
        }
        VerificationResult::NotConfigured => {
            ApiError::bad_request("PIN is not set up for this profile").into_response()
        }
    }
}

/// Response for a storage failure during verification.
pub fn verify_failure_response() -> Response {
    ApiError::internal("Failed to verify PIN").into_response()
}
