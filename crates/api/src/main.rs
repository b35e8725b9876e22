use std::sync::Arc;

use markethub_api::app::{self, services::AppServices};
use markethub_api::app::services::{InMemoryIdentityProvider, InMemoryUserDirectory};
use markethub_auth::AuthConfig;

#[tokio::main]
async fn main() {
    markethub_observability::init();

    // In-memory collaborators until the external provider/store integrations
    // are wired; credentials are registered out of band.
    let services = Arc::new(AppServices::new(
        InMemoryIdentityProvider::new(),
        InMemoryUserDirectory::new(),
        AuthConfig::default(),
    ));

    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
