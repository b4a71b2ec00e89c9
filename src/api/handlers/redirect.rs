//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, warn};

use super::check_path_code;
use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Check cache for URL (cache key: `url:{code}`)
/// 2. On cache miss, query database
/// 3. Asynchronously update cache
/// 4. Send click event to background worker
/// 5. Return 307 Temporary Redirect
///
/// # Click Tracking
///
/// Click events are sent to a bounded channel for async processing.
/// If the queue is full, the click is dropped (fire-and-forget).
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 422 Unprocessable Entity if the code is empty or too long.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    check_path_code(&code)?;

    let long_url = match state.cache.get_url(&code).await {
        Ok(Some(cached_url)) => {
            debug!("Cache HIT for {}", code);
            metrics::counter!("tinylink_cache_hits_total").increment(1);
            cached_url
        }
        Ok(None) => {
            debug!("Cache MISS for {}", code);
            metrics::counter!("tinylink_cache_misses_total").increment(1);

            let link = state.link_service.resolve(&code).await?;

            let cache = state.cache.clone();
            let cache_code = code.clone();
            let url = link.long_url.clone();
            tokio::spawn(async move {
                if let Err(e) = cache.set_url(&cache_code, &url, None).await {
                    error!("Failed to cache URL: {}", e);
                }
            });

            link.long_url
        }
        Err(e) => {
            error!("Cache error: {}", e);
            state.link_service.resolve(&code).await?.long_url
        }
    };

    match state.click_sender.try_send(ClickEvent::now(code)) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            metrics::counter!("tinylink_clicks_dropped_total").increment(1);
            warn!("Click queue full, dropping click for {}", event.code);
        }
        Err(TrySendError::Closed(event)) => {
            metrics::counter!("tinylink_clicks_dropped_total").increment(1);
            warn!("Click queue closed, dropping click for {}", event.code);
        }
    }

    metrics::counter!("tinylink_redirects_total").increment(1);

    Ok(Redirect::temporary(&long_url))
}
