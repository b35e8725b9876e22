//! Capability reporting for rendering code.
//!
//! The booleans here are computed from the same pure predicates the server
//! gates use, so what the UI shows and what the server enforces cannot
//! diverge. The answer is advisory: showing a button is not granting access,
//! every gated operation re-checks authoritatively.

use axum::{Json, Router, extract::Extension, response::Response, routing::get};
use serde::Serialize;

use markethub_auth::{Role, SERVICE_ROLES, Tier, can_access, meets_any, require_session};
use markethub_core::ServiceResult;

use crate::app::errors;
use crate::middleware::SharedResolver;

pub fn router() -> Router {
    Router::new()
        .route("/", get(whoami))
        .route("/capabilities", get(capabilities))
}

#[derive(Debug, Serialize)]
pub struct Capabilities {
    pub role: Option<Role>,
    pub tier: Option<Tier>,
    pub can_offer_services: bool,
    pub can_feature_listings: bool,
    pub can_administer: bool,
}

impl Capabilities {
    fn none() -> Self {
        Self {
            role: None,
            tier: None,
            can_offer_services: false,
            can_feature_listings: false,
            can_administer: false,
        }
    }
}

pub async fn whoami(Extension(resolver): Extension<SharedResolver>) -> Response {
    match require_session(&*resolver) {
        Ok(session) => errors::envelope_response(&ServiceResult::ok(session)),
        Err(denial) => errors::denial_response(denial),
    }
}

pub async fn capabilities(Extension(resolver): Extension<SharedResolver>) -> Json<Capabilities> {
    // Render-decision data: an absent session simply has no capabilities,
    // there is nothing to deny here.
    let session = resolver.resolve();

    let Some(session) = session else {
        return Json(Capabilities::none());
    };
    let (role, tier) = (session.role, session.tier);

    Json(Capabilities {
        role: Some(role),
        tier,
        can_offer_services: can_access(role, &SERVICE_ROLES),
        can_feature_listings: tier.is_some_and(|t| meets_any(&[Tier::Pro, Tier::Business], t)),
        can_administer: role == Role::Admin,
    })
}
