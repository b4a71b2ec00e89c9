//! API route configuration.

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler, stats_handler};
use crate::api::middleware::rate_limit::StatsRateLimit;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link creation and redirect routes.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short link
/// - `GET  /health`  - Health check: database, cache, click queue
/// - `GET  /{code}`  - Redirect to the long URL
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
}

/// Statistics routes, limited per client IP.
///
/// # Endpoints
///
/// - `GET /stats/{code}` - Click statistics for a short link
pub fn stats_routes(rate_limit: StatsRateLimit) -> Router<AppState> {
    Router::new()
        .route("/stats/{code}", get(stats_handler))
        .layer(rate_limit)
}
