//! Request middleware: attach a per-request session resolver.
//!
//! The middleware never denies by itself — it extracts the (optional) bearer
//! credential, builds one resolver for the request, and stashes it in the
//! request extensions. Guards downstream decide; page routes need the request
//! to reach them even without a credential so they can redirect to login.

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use markethub_auth::{AuthConfig, ClaimResolver, IdentityProvider, ResolveSession};

/// The per-request resolver as stored in request extensions.
pub type SharedResolver = Arc<dyn ResolveSession>;

#[derive(Clone)]
pub struct AuthState {
    pub provider: Arc<dyn IdentityProvider>,
    pub config: Arc<AuthConfig>,
}

pub async fn session_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let credential = extract_bearer(req.headers()).map(str::to_string);

    let resolver: SharedResolver = Arc::new(ClaimResolver::new(
        state.provider.clone(),
        credential,
        &state.config,
    ));
    req.extensions_mut().insert(resolver);

    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() { None } else { Some(token) }
}
