//! Rate limiting middleware using token bucket algorithm.

use anyhow::Context;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Rate limiter type applied to the statistics routes.
pub type StatsRateLimit =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a per-IP rate limiter.
///
/// # Limits
///
/// - **Rate**: one token replenished every `period_ms` milliseconds
/// - **Burst**: `burst` requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Limits are applied per client IP taken from the socket peer address, so
/// the router must be served with `into_make_service_with_connect_info`.
///
/// # Errors
///
/// Fails if `period_ms` or `burst` is zero.
///
/// # Example
///
/// ```rust,ignore
/// let stats = Router::new()
///     .route("/stats/{code}", get(stats_handler))
///     .layer(rate_limit::layer(500, 20)?);
/// ```
pub fn layer(period_ms: u64, burst: u32) -> anyhow::Result<StatsRateLimit> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(period_ms)
        .burst_size(burst)
        .finish()
        .context("Rate limit period and burst must both be positive")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
