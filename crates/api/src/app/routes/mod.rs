use axum::{Router, routing::get};

pub mod admin;
pub mod listings;
pub mod me;
pub mod pages;
pub mod system;

/// Router for everything behind the session middleware.
pub fn router() -> Router {
    Router::new()
        .route("/dashboard", get(pages::dashboard))
        .route("/dashboard/services", get(pages::services_dashboard))
        .route("/admin", get(pages::admin_dashboard))
        .nest("/api/listings", listings::router())
        .nest("/api/admin", admin::router())
        .nest("/api/me", me::router())
}
