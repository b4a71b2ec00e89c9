//! Click statistics service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::LinkStats;
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// Service for reading click statistics.
///
/// Counters are written by [`crate::domain::click_worker`], not here.
pub struct StatsService {
    repository: Arc<dyn StatsRepository>,
}

impl StatsService {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<dyn StatsRepository>) -> Self {
        Self { repository }
    }

    /// Retrieves click statistics for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_stats(&self, code: &str) -> Result<LinkStats, AppError> {
        self.repository
            .get_stats(code)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "code": code })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockStatsRepository;
    use chrono::Utc;

    #[tokio::test]
    async fn test_get_stats_success() {
        let mut repo = MockStatsRepository::new();
        let accessed = Utc::now();

        repo.expect_get_stats()
            .withf(|code| code == "google")
            .times(1)
            .returning(move |code| {
                Ok(Some(LinkStats {
                    code: code.to_string(),
                    long_url: "https://google.com/".to_string(),
                    clicks: 12,
                    last_accessed: Some(accessed),
                }))
            });

        let stats = StatsService::new(Arc::new(repo))
            .get_stats("google")
            .await
            .unwrap();

        assert_eq!(stats.clicks, 12);
        assert_eq!(stats.last_accessed, Some(accessed));
    }

    #[tokio::test]
    async fn test_get_stats_not_found() {
        let mut repo = MockStatsRepository::new();
        repo.expect_get_stats().times(1).returning(|_| Ok(None));

        let result = StatsService::new(Arc::new(repo)).get_stats("nope").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
