//! Consistent boundary responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Serialize;

use markethub_auth::{AuthConfig, GateDenial};
use markethub_core::{ErrorCode, ServiceResult};

/// Serialize a `ServiceResult` envelope with its effective transport status.
pub fn envelope_response<T: Serialize>(result: &ServiceResult<T>) -> Response {
    let status =
        StatusCode::from_u16(result.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(result)).into_response()
}

/// API-boundary denial: envelope, no redirect.
pub fn denial_response(denial: GateDenial) -> Response {
    envelope_response(&denial.into_service_result::<()>())
}

/// Page-boundary denial: redirect to the fixed fallback target.
pub fn denial_redirect(denial: &GateDenial, config: &AuthConfig) -> Response {
    Redirect::to(&denial.redirect_target(config)).into_response()
}

/// Malformed request input, surfaced through the same envelope.
pub fn validation_response(message: impl Into<String>) -> Response {
    envelope_response::<()>(&ServiceResult::fail(ErrorCode::Validation, message))
}
