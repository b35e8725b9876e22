//! Listing routes (API boundary): gate denials become envelope failures.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    response::Response,
    routing::{get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use markethub_auth::{SERVICE_ROLES, Tier, require_any_role, require_tier};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::middleware::SharedResolver;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_listings).post(create_listing))
        .route("/featured", post(create_featured_listing))
        .route("/:id", get(get_listing))
}

#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub title: String,
}

/// List the caller's own listings. Service roles only; admins must be listed
/// explicitly in the allowed set, and they are.
pub async fn list_listings(
    Extension(resolver): Extension<SharedResolver>,
    Extension(services): Extension<Arc<AppServices>>,
) -> Response {
    let session = match require_any_role(&*resolver, &SERVICE_ROLES) {
        Ok(session) => session,
        Err(denial) => return errors::denial_response(denial),
    };

    errors::envelope_response(&services.catalog.list_for(session.user_id))
}

pub async fn create_listing(
    Extension(resolver): Extension<SharedResolver>,
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<CreateListingRequest>, JsonRejection>,
) -> Response {
    let session = match require_any_role(&*resolver, &SERVICE_ROLES) {
        Ok(session) => session,
        Err(denial) => return errors::denial_response(denial),
    };

    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::validation_response(rejection.to_string()),
    };

    errors::envelope_response(&services.catalog.create(session.user_id, body.title, false))
}

/// Featured listings are a paid capability: pro or business tier.
///
/// The UI decides whether to *show* the feature from the same tier predicate
/// (see `me::capabilities`); this server-side gate is the authoritative one.
pub async fn create_featured_listing(
    Extension(resolver): Extension<SharedResolver>,
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<CreateListingRequest>, JsonRejection>,
) -> Response {
    let session = match require_tier(&*resolver, &[Tier::Pro, Tier::Business]) {
        Ok(session) => session,
        Err(denial) => return errors::denial_response(denial),
    };

    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::validation_response(rejection.to_string()),
    };

    errors::envelope_response(&services.catalog.create(session.user_id, body.title, true))
}

pub async fn get_listing(
    Extension(resolver): Extension<SharedResolver>,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    if let Err(denial) = require_any_role(&*resolver, &SERVICE_ROLES) {
        return errors::denial_response(denial);
    }

    let id = match Uuid::from_str(&id) {
        Ok(id) => id,
        Err(_) => return errors::validation_response("invalid listing id"),
    };

    errors::envelope_response(&services.catalog.get(id))
}
