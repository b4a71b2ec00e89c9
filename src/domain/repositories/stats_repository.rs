//! Repository trait for click counters.

use crate::domain::entities::LinkStats;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for reading and updating click statistics.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStatsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Increments the click counter of `code` and records `accessed_at`.
    ///
    /// `last_accessed` never moves backwards, so out-of-order updates from
    /// concurrent workers keep the latest timestamp.
    ///
    /// Returns `Ok(false)` if no link matches `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_click(&self, code: &str, accessed_at: DateTime<Utc>)
    -> Result<bool, AppError>;

    /// Retrieves click statistics for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_stats(&self, code: &str) -> Result<Option<LinkStats>, AppError>;
}
