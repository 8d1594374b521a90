//! Souq storefront library.
//!
//! Server-rendered marketplace pages for buyers, sellers, and admins. The
//! binary in `main.rs` adds configuration, tracing, and Sentry around the
//! router built by [`app`]; tests drive the same router in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod views;

use axum::{
    Router,
    extract::Request,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::middleware::{
    SecurityHeaders, create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Directory holding `css/main.css` and the hashed copies made by `build.rs`.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the full application router.
///
/// Layers, outermost first: tracing, request ID, security headers, session.
pub fn app(state: AppState) -> Router {
    let security = SecurityHeaders::new(state.config().backend.as_ref().map(|b| &b.url));
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(not_found)
        .layer(session_layer)
        .layer(from_fn_with_state(security, security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> AppError {
    AppError::NotFound("page".to_string())
}
