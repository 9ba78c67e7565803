//! Route modules for the DocShare server

pub mod documents;
pub mod health;
pub mod library;
pub mod pages;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(pages::router())
        .route("/health", get(health::health_check))
        .route("/api/v1/health", get(health::health_check))
        .nest("/api/v1/documents", documents::router())
        .nest("/api/v1/folders", library::folders_router())
        .nest("/api/v1/me", library::me_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
