//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use tracing::{info, warn};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "https://example.com/some/page",
///   "custom_alias": "my-link"
/// }
/// ```
///
/// `custom_alias` is optional; an empty string counts as absent.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortUrl": "eyWH",
///   "longUrl": "https://example.com/some/page",
///   "createdAt": "2024-01-01T12:00:00Z"
/// }
/// ```
///
/// The new mapping is written to the cache before responding so the first
/// redirect is a hit.
///
/// # Errors
///
/// Returns 422 Unprocessable Entity for invalid URLs or aliases.
/// Returns 409 Conflict if the alias is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_short_link(&payload.long_url, payload.custom_alias)
        .await?;

    if let Err(e) = state.cache.set_url(&link.code, &link.long_url, None).await {
        warn!("Failed to cache new link {}: {}", link.code, e);
    }

    info!(code = %link.code, "Short link created");

    Ok((StatusCode::CREATED, Json(link.into())))
}
