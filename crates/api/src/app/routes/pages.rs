//! Page-boundary routes: a gate denial becomes a navigation redirect.
//!
//! Rendering proper is out of scope; the handlers return placeholder bodies.
//! What matters is the gating and the redirect targets.

use std::sync::Arc;

use axum::{
    extract::Extension,
    response::{Html, IntoResponse, Response},
};

use markethub_auth::{Role, SERVICE_ROLES, require_any_role, require_role, require_session};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::middleware::SharedResolver;

pub async fn dashboard(
    Extension(resolver): Extension<SharedResolver>,
    Extension(services): Extension<Arc<AppServices>>,
) -> Response {
    match require_session(&*resolver) {
        Ok(session) => Html(format!("<h1>Dashboard</h1><p>user {}</p>", session.user_id)).into_response(),
        Err(denial) => errors::denial_redirect(&denial, &services.config),
    }
}

pub async fn services_dashboard(
    Extension(resolver): Extension<SharedResolver>,
    Extension(services): Extension<Arc<AppServices>>,
) -> Response {
    match require_any_role(&*resolver, &SERVICE_ROLES) {
        Ok(session) => {
            Html(format!("<h1>Service dashboard</h1><p>{}</p>", session.role)).into_response()
        }
        Err(denial) => errors::denial_redirect(&denial, &services.config),
    }
}

pub async fn admin_dashboard(
    Extension(resolver): Extension<SharedResolver>,
    Extension(services): Extension<Arc<AppServices>>,
) -> Response {
    match require_role(&*resolver, Role::Admin) {
        Ok(_session) => Html("<h1>Admin</h1>".to_string()).into_response(),
        Err(denial) => errors::denial_redirect(&denial, &services.config),
    }
}
