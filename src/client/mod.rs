//! Terminal client for the shortener HTTP API.
//!
//! Each user action issues at most one request. Nothing is retried, queued
//! or cached; every failure maps to one [`ClientError`] whose message is
//! shown as-is. The exception is the redirect load driver in [`load`].

pub mod clipboard;
pub mod error;
pub mod load;
pub mod view;

pub use clipboard::{COPIED_MESSAGE, Clipboard, Osc52Clipboard, copy_link};
pub use error::ClientError;
pub use load::{LoadPlan, LoadReport};
pub use view::{ShortenView, StatsView};

use reqwest::{Client as HttpClient, Response, StatusCode, redirect};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Backend address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_REJECTED: &str = "The request was rejected.";
const DEFAULT_SERVER_ERROR: &str = "Server returned error";

#[derive(Serialize)]
struct ShortenBody<'a> {
    #[serde(rename = "longUrl")]
    long_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_alias: Option<&'a str>,
}

#[derive(Deserialize)]
struct ShortenPayload {
    #[serde(rename = "shortUrl")]
    short_url: String,
}

/// Statistics as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteStats {
    pub clicks: i64,
    #[serde(rename = "longUrl")]
    pub long_url: String,
    #[serde(default)]
    pub last_accessed: Option<String>,
}

#[derive(Deserialize)]
struct ErrorPayload {
    detail: Option<serde_json::Value>,
}

/// HTTP client bound to one backend.
pub struct ShortenerClient {
    http: HttpClient,
    base_url: String,
}

impl ShortenerClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the base URL is not an absolute
    /// http(s) URL or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        let parsed = Url::parse(&base_url).map_err(|e| ClientError::Config(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Shortens `long_url`, optionally under `custom_alias`.
    ///
    /// Empty or whitespace-only URLs fail before any request is made. An
    /// empty alias is left out of the request.
    ///
    /// # Errors
    ///
    /// - [`ClientError::EmptyUrl`] without issuing a request
    /// - [`ClientError::AliasTaken`] on 400 or 409
    /// - [`ClientError::Rejected`] on 422
    /// - [`ClientError::Server`] on any other non-success status
    /// - [`ClientError::Connection`] when the request could not be sent
    pub async fn shorten(
        &self,
        long_url: &str,
        custom_alias: &str,
    ) -> Result<ShortenView, ClientError> {
        if long_url.trim().is_empty() {
            return Err(ClientError::EmptyUrl);
        }

        let alias = custom_alias.trim();
        let body = ShortenBody {
            long_url: long_url.trim(),
            custom_alias: (!alias.is_empty()).then_some(alias),
        };

        let response = self
            .http
            .post(self.endpoint(&["shorten"])?)
            .json(&body)
            .send()
            .await
            .map_err(ClientError::Connection)?;

        let status = response.status();
        if status.is_success() {
            let payload: ShortenPayload = response
                .json()
                .await
                .map_err(ClientError::InvalidResponse)?;
            return Ok(ShortenView::new(&self.base_url, &payload.short_url));
        }

        tracing::debug!(%status, "shorten request failed");

        match status {
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT => Err(ClientError::AliasTaken),
            StatusCode::UNPROCESSABLE_ENTITY => Err(ClientError::Rejected(
                read_detail(response)
                    .await
                    .unwrap_or_else(|| DEFAULT_REJECTED.to_string()),
            )),
            _ => Err(server_error(status, response).await),
        }
    }

    /// Fetches click statistics for `code`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::EmptyCode`] without issuing a request
    /// - [`ClientError::NotFound`] on 404
    /// - [`ClientError::RateLimited`] on 429
    /// - [`ClientError::Server`] on any other non-success status
    /// - [`ClientError::Connection`] when the request could not be sent
    pub async fn stats(&self, code: &str) -> Result<RemoteStats, ClientError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ClientError::EmptyCode);
        }

        let response = self
            .http
            .get(self.endpoint(&["stats", code])?)
            .send()
            .await
            .map_err(ClientError::Connection)?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(ClientError::InvalidResponse);
        }

        tracing::debug!(%status, "stats request failed");

        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => Err(ClientError::RateLimited),
            _ => Err(server_error(status, response).await),
        }
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ClientError::Config(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Config("base URL cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn server_error(status: StatusCode, response: Response) -> ClientError {
    ClientError::Server {
        status: status.as_u16(),
        detail: read_detail(response)
            .await
            .unwrap_or_else(|| DEFAULT_SERVER_ERROR.to_string()),
    }
}

/// Extracts a non-empty string `detail` from an error body.
async fn read_detail(response: Response) -> Option<String> {
    let payload: ErrorPayload = response.json().await.ok()?;
    payload
        .detail?
        .as_str()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ShortenerClient {
        ShortenerClient::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        assert_eq!(
            client("http://127.0.0.1:8000/").base_url(),
            "http://127.0.0.1:8000"
        );
    }

    #[test]
    fn test_new_rejects_bad_base() {
        assert!(matches!(
            ShortenerClient::new("not a url", Duration::from_secs(1)),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            ShortenerClient::new("ftp://host", Duration::from_secs(1)),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_endpoint_encodes_code() {
        let url = client("http://127.0.0.1:8000")
            .endpoint(&["stats", "a b/c"])
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/stats/a%20b%2Fc");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = client("http://host/api/").endpoint(&["shorten"]).unwrap();
        assert_eq!(url.as_str(), "http://host/api/shorten");
    }

    #[test]
    fn test_body_omits_empty_alias() {
        let body = ShortenBody {
            long_url: "https://a.com",
            custom_alias: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "longUrl": "https://a.com" })
        );
    }
}
