//! DTOs for link shortening endpoint.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use validator::{Validate, ValidationError};

use crate::domain::entities::Link;
use crate::utils::code_generator::MAX_ALIAS_LENGTH;
use crate::utils::url_normalizer::MAX_URL_LENGTH;

/// `MAX_ALIAS_LENGTH` as the `u64` that `validator`'s `length` expects.
const MAX_ALIAS_LENGTH_U64: u64 = MAX_ALIAS_LENGTH as u64;

/// Request to shorten a single URL.
///
/// An empty `custom_alias` is treated the same as a missing one.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[serde(rename = "longUrl")]
    #[validate(custom(function = validate_long_url_length))]
    pub long_url: String,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = MAX_ALIAS_LENGTH_U64))]
    pub custom_alias: Option<String>,
}

fn validate_long_url_length(long_url: &str) -> Result<(), ValidationError> {
    if long_url.is_empty() {
        return Err(
            ValidationError::new("length").with_message(Cow::Borrowed("URL must not be empty"))
        );
    }
    if long_url.len() > MAX_URL_LENGTH {
        return Err(ValidationError::new("length").with_message(Cow::Owned(format!(
            "URL must be at most {MAX_URL_LENGTH} characters"
        ))));
    }
    Ok(())
}

/// Newly created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    /// The short code only; clients join it with their base URL.
    pub short_url: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for ShortenResponse {
    fn from(link: Link) -> Self {
        Self {
            short_url: link.code,
            long_url: link.long_url,
            created_at: link.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_alias_is_none() {
        let req: ShortenRequest =
            serde_json::from_value(json!({ "longUrl": "https://a.com", "custom_alias": "" }))
                .unwrap();
        assert_eq!(req.custom_alias, None);
    }

    #[test]
    fn test_missing_and_null_alias() {
        let req: ShortenRequest =
            serde_json::from_value(json!({ "longUrl": "https://a.com" })).unwrap();
        assert_eq!(req.custom_alias, None);

        let req: ShortenRequest =
            serde_json::from_value(json!({ "longUrl": "https://a.com", "custom_alias": null }))
                .unwrap();
        assert_eq!(req.custom_alias, None);
    }

    #[test]
    fn test_empty_url_fails_validation() {
        let req: ShortenRequest = serde_json::from_value(json!({ "longUrl": "" })).unwrap();
        let err = req.validate().unwrap_err().to_string();
        assert!(err.contains("URL must not be empty"), "{err}");
    }

    #[test]
    fn test_overlong_url_has_its_own_message() {
        let long_url = format!("https://a.com/{}", "x".repeat(MAX_URL_LENGTH));
        let req: ShortenRequest = serde_json::from_value(json!({ "longUrl": long_url })).unwrap();
        let err = req.validate().unwrap_err().to_string();
        assert!(err.contains("at most 2083 characters"), "{err}");
        assert!(!err.contains("must not be empty"), "{err}");
    }

    #[test]
    fn test_response_uses_camel_case() {
        let now = Utc::now();
        let body = serde_json::to_value(ShortenResponse::from(Link::new(
            7,
            "abc".to_string(),
            "https://a.com/".to_string(),
            now,
        )))
        .unwrap();

        assert_eq!(body["shortUrl"], "abc");
        assert_eq!(body["longUrl"], "https://a.com/");
        assert!(body.get("createdAt").is_some());
    }
}
