//! Rendering of backend responses into what the user sees.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

/// Longest original URL shown before truncation.
pub const MAX_DISPLAY_URL: usize = 50;

const NEVER: &str = "Never";

/// A freshly created short link as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenView {
    pub link_text: String,
    pub href: String,
}

impl ShortenView {
    /// Joins the base URL and the short code, dropping any trailing `/`
    /// from the base.
    pub fn new(base_url: &str, code: &str) -> Self {
        let link = format!("{}/{}", base_url.trim_end_matches('/'), code);
        Self {
            link_text: link.clone(),
            href: link,
        }
    }
}

/// Statistics for a short code as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub clicks: i64,
    pub original_url: String,
    pub last_accessed: String,
}

impl StatsView {
    /// Builds the view, rendering timestamps in `tz`.
    pub fn new<Tz>(clicks: i64, long_url: &str, last_accessed: Option<&str>, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            clicks,
            original_url: truncate_url(long_url, MAX_DISPLAY_URL),
            last_accessed: format_last_accessed(last_accessed, tz),
        }
    }
}

/// Cuts `url` to `max` characters and appends `...` when it was longer.
pub fn truncate_url(url: &str, max: usize) -> String {
    match url.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &url[..cut]),
        None => url.to_string(),
    }
}

/// Formats a wire timestamp as `YYYY-MM-DD HH:MM:SS` in `tz`.
///
/// RFC 3339 values are converted. Values without an offset are taken as UTC.
/// Missing or empty values render as `Never`; anything unparsable is shown
/// as received.
pub fn format_last_accessed<Tz>(raw: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return NEVER.to_string();
    };

    match parse_timestamp(raw) {
        Some(ts) => ts
            .with_timezone(tz)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => raw.to_string(),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_shorten_view_trims_trailing_slash() {
        let view = ShortenView::new("http://127.0.0.1:8000/", "eyWH");
        assert_eq!(view.link_text, "http://127.0.0.1:8000/eyWH");
        assert_eq!(view.href, view.link_text);
    }

    #[test]
    fn test_truncate_url() {
        let short = "https://example.com/";
        assert_eq!(truncate_url(short, MAX_DISPLAY_URL), short);

        let exact = "a".repeat(MAX_DISPLAY_URL);
        assert_eq!(truncate_url(&exact, MAX_DISPLAY_URL), exact);

        let long = format!("https://example.com/{}", "x".repeat(60));
        let cut = truncate_url(&long, MAX_DISPLAY_URL);
        assert_eq!(cut.chars().count(), MAX_DISPLAY_URL + 3);
        assert!(cut.ends_with("..."));
        assert!(long.starts_with(cut.trim_end_matches("...")));
    }

    #[test]
    fn test_truncate_url_multibyte() {
        let url = "é".repeat(60);
        assert_eq!(
            truncate_url(&url, MAX_DISPLAY_URL),
            format!("{}...", "é".repeat(MAX_DISPLAY_URL))
        );
    }

    #[test]
    fn test_missing_last_accessed_is_never() {
        assert_eq!(format_last_accessed(None, &Utc), "Never");
        assert_eq!(format_last_accessed(Some(""), &Utc), "Never");
    }

    #[test]
    fn test_last_accessed_in_viewer_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            format_last_accessed(Some("2024-03-01T10:15:30Z"), &tz),
            "2024-03-01 12:15:30"
        );
    }

    #[test]
    fn test_naive_timestamp_is_utc() {
        assert_eq!(
            format_last_accessed(Some("2024-03-01T10:15:30.123456"), &Utc),
            "2024-03-01 10:15:30"
        );
    }

    #[test]
    fn test_unparsable_timestamp_shown_raw() {
        assert_eq!(format_last_accessed(Some("yesterday"), &Utc), "yesterday");
    }

    #[test]
    fn test_stats_view() {
        let view = StatsView::new(3, "https://example.com/", None, &Utc);
        assert_eq!(view.clicks, 3);
        assert_eq!(view.original_url, "https://example.com/");
        assert_eq!(view.last_accessed, "Never");
    }
}
