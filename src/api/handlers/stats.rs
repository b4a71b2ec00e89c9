//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use super::check_path_code;
use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns click statistics for a short link.
///
/// # Endpoint
///
/// `GET /stats/{code}`
///
/// # Response
///
/// ```json
/// {
///   "shortUrl": "eyWH",
///   "longUrl": "https://example.com/",
///   "clicks": 3,
///   "last_accessed": "2024-01-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 429 Too Many Requests when the per-IP limit is exhausted.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    check_path_code(&code)?;

    let stats = state.stats_service.get_stats(&code).await?;

    Ok(Json(stats.into()))
}
