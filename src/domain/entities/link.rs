//! Short link entity and its click statistics.

use chrono::{DateTime, Utc};

/// A stored mapping from a short code to a long URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
    pub last_accessed: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a link that has never been visited.
    pub fn new(id: i64, code: String, long_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            long_url,
            created_at,
            clicks: 0,
            last_accessed: None,
        }
    }

    /// Returns the statistics view of this link.
    pub fn stats(&self) -> LinkStats {
        LinkStats {
            code: self.code.clone(),
            long_url: self.long_url.clone(),
            clicks: self.clicks,
            last_accessed: self.last_accessed,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub code: String,
    pub long_url: String,
}

/// Click statistics for a single short code.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkStats {
    pub code: String,
    pub long_url: String,
    pub clicks: i64,
    pub last_accessed: Option<DateTime<Utc>>,
}
