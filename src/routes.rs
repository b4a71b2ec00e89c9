//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`       - Create a short link
//! - `GET  /stats/{code}`  - Click statistics (rate limited per IP)
//! - `GET  /health`        - Health check
//! - `GET  /{code}`        - Short link redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Configured origin list with credentials
//! - **Rate limiting** - Per-IP token bucket on `/stats`
//!
//! Trailing-slash normalization has to wrap the router from the outside, see
//! [`app_service`].

use crate::api;
use crate::api::middleware::{cors, rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Router settings derived from [`Config`].
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub cors_origins: Vec<String>,
    pub stats_rate_limit_period_ms: u64,
    pub stats_rate_limit_burst: u32,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cors_origins: vec![
                "http://localhost:5500".to_string(),
                "http://localhost:8000".to_string(),
            ],
            stats_rate_limit_period_ms: 500,
            stats_rate_limit_burst: 20,
        }
    }
}

impl From<&Config> for RouterConfig {
    fn from(config: &Config) -> Self {
        Self {
            cors_origins: config.cors_origins.clone(),
            stats_rate_limit_period_ms: config.stats_rate_limit_period_ms,
            stats_rate_limit_burst: config.stats_rate_limit_burst,
        }
    }
}

/// Constructs the application router with all routes and middleware.
///
/// The stats limiter keys on the peer address, so the router must be served
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Errors
///
/// Fails if a CORS origin is invalid or the rate limit settings are zero.
pub fn app_router(state: AppState, config: &RouterConfig) -> anyhow::Result<Router> {
    let stats_limit = rate_limit::layer(
        config.stats_rate_limit_period_ms,
        config.stats_rate_limit_burst,
    )?;

    Ok(Router::new()
        .merge(api::routes::stats_routes(stats_limit))
        .merge(api::routes::public_routes())
        .with_state(state)
        .layer(cors::layer(&config.cors_origins)?)
        .layer(tracing::layer()))
}

/// [`app_router`] wrapped so that `/stats/abc/` is routed like `/stats/abc`.
///
/// Path normalization has to run before routing, so it cannot be a
/// `Router::layer`.
///
/// # Errors
///
/// Same as [`app_router`].
pub fn app_service(
    state: AppState,
    config: &RouterConfig,
) -> anyhow::Result<NormalizePath<Router>> {
    Ok(NormalizePathLayer::trim_trailing_slash().layer(app_router(state, config)?))
}
