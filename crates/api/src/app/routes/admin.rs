//! Admin routes, gated by the optimized admin composition.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use markethub_auth::require_admin;
use markethub_core::ServiceResult;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::middleware::SharedResolver;

pub fn router() -> Router {
    Router::new()
        .route("/access", get(access))
        .route("/users", get(users))
}

/// The bare admin check, returned in its wire shape:
/// `{"success":true,"userId":...}` or `{"success":false,"error":...,"status":...}`.
pub async fn access(Extension(resolver): Extension<SharedResolver>) -> Response {
    let check = require_admin(&*resolver);
    let status = StatusCode::from_u16(check.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(check)).into_response()
}

/// Admin-only: the full user directory.
pub async fn users(
    Extension(resolver): Extension<SharedResolver>,
    Extension(services): Extension<Arc<AppServices>>,
) -> Response {
    let check = require_admin(&*resolver);
    if !check.is_granted() {
        let status =
            StatusCode::from_u16(check.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, Json(check)).into_response();
    }

    errors::envelope_response(&ServiceResult::ok(services.directory.all()))
}
