//! PostgreSQL implementation of statistics repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::LinkStats;
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// PostgreSQL repository for per-link click counters.
///
/// Counters live on the `urls` row itself. Each click is a single atomic
/// `UPDATE`, so concurrent workers never lose increments.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct StatsRow {
    short_url: String,
    long_url: String,
    clicks: i64,
    last_accessed: Option<DateTime<Utc>>,
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn record_click(
        &self,
        code: &str,
        accessed_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        // last_accessed never moves backwards when events land out of order
        let result = sqlx::query(
            r#"
            UPDATE urls
            SET clicks = clicks + 1,
                last_accessed = GREATEST(COALESCE(last_accessed, $2), $2)
            WHERE short_url = $1
            "#,
        )
        .bind(code)
        .bind(accessed_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_stats(&self, code: &str) -> Result<Option<LinkStats>, AppError> {
        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT short_url, long_url, clicks, last_accessed
            FROM urls
            WHERE short_url = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| LinkStats {
            code: r.short_url,
            long_url: r.long_url,
            clicks: r.clicks,
            last_accessed: r.last_accessed,
        }))
    }
}
