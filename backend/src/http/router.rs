//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! static image serving, and creates the axum router ready for serving.

use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use super::handlers;
use super::state::AppState;

/// Largest accepted JSON body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router with all routes and middleware.
///
/// Files under `images_dir` are served at `/images/*`.
pub fn create_router(state: AppState, images_dir: impl AsRef<Path>) -> Router {
    // Any origin may call the API; the storefront is served from elsewhere.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Every request is logged at INFO with its method and URI.
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/lessons", get(handlers::list_lessons))
        .route("/lessons/{id}", put(handlers::update_lesson))
        .route("/search", get(handlers::search_lessons))
        .route("/orders", post(handlers::create_order))
        .nest_service("/images", ServeDir::new(images_dir.as_ref()))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(trace)
        .layer(cors)
        .with_state(state)
}
