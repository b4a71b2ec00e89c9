//! DTOs for link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::LinkStats;

/// Click statistics for one short code.
///
/// `last_accessed` is always present and `null` for links that were never
/// visited.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(rename = "shortUrl")]
    pub short_url: String,
    #[serde(rename = "longUrl")]
    pub long_url: String,
    pub clicks: i64,
    pub last_accessed: Option<DateTime<Utc>>,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            short_url: stats.code,
            long_url: stats.long_url,
            clicks: stats.clicks,
            last_accessed: stats.last_accessed,
        }
    }
}
