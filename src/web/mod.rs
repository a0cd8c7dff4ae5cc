// src/web/mod.rs
// HTTP surface for the analysis pipeline

pub mod api;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::web::state::AppState;

/// Create the HTTP router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_router = Router::new()
        .route("/analyze", post(api::analyze))
        .with_state(state);

    Router::new()
        .route("/health", get(api::health))
        .nest("/api", api_router)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
