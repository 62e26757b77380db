//! Route configuration.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

/// Request body ceiling: the largest per-file limit plus slack for
/// multipart framing.
fn body_limit(state: &AppState) -> usize {
    let largest = state
        .config
        .documents
        .max_file_size_bytes
        .max(state.config.images.max_file_size_bytes)
        .max(state.config.covers.max_file_size_bytes);
    largest as usize + 1024 * 1024
}

pub fn setup_routes(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let limit = body_limit(&state);

    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .route(
            "/api/v0/uploads/{category}",
            post(handlers::uploads::upload_file),
        )
        .route("/api/v0/articles", post(handlers::articles::submit_article))
        .route(
            "/api/v0/articles/{id}",
            get(handlers::articles::get_article),
        )
        .layer(DefaultBodyLimit::max(limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
