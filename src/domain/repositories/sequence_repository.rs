//! Repository trait for named monotonic counters.

use crate::error::AppError;
use async_trait::async_trait;

/// Name of the counter that feeds generated short codes.
pub const URL_SEQUENCE: &str = "url_id";

/// Atomically incremented counters, created on first use.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SequenceRepository: Send + Sync {
    /// Increments the counter `name` and returns the new value.
    ///
    /// The first call for a name returns `1`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn next_value(&self, name: &str) -> Result<i64, AppError>;
}
