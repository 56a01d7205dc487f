//! Route definitions and router setup
//!
//! Configures all API routes and middleware.

mod comments;
mod posts;

use crate::error::{validation_error, AppError};
use crate::state::SharedState;
use axum::{
    http::{header, Method},
    routing::{get, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::Level;

pub const INVALID_ID: &str = "invalid id";

/// Create the application router with all routes and middleware
pub fn create_router(state: SharedState) -> Router {
    // Build tracing/logging layer
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Build middleware stack
    let middleware = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(trace_layer)
        .layer(CompressionLayer::new())
        .layer(build_cors_layer())
        .propagate_x_request_id();

    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Post routes
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )

        // Comment routes
        .route(
            "/posts/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/posts/{id}/comments/{comment_id}",
            put(comments::update_comment).delete(comments::delete_comment),
        )

        // Apply middleware and state
        .layer(middleware)
        .with_state(state)
}

/// CORS for every origin
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Parse a path segment as a row id, rejecting anything that isn't a 32-bit integer
fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse().map_err(|_| validation_error(INVALID_ID))
}

/// Health check endpoint
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
