//! HTTP application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: collaborator implementations and the listing catalog
//! - `routes/`: HTTP routes + handlers (pages vs API per file)
//! - `errors.rs`: consistent boundary responses (envelope / redirect)

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::middleware;

pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        provider: services.provider.clone(),
        config: services.config.clone(),
    };

    // Everything except /health runs behind the session middleware: each
    // request gets one resolver, each guard reuses it.
    let gated = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::session_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(gated)
}
