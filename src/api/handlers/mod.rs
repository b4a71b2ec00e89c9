//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod shorten;
pub mod stats;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use stats::stats_handler;

use crate::error::AppError;
use crate::utils::code_generator::MAX_ALIAS_LENGTH;
use serde_json::json;

/// Rejects path codes that could never have been stored.
pub(crate) fn check_path_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() || code.chars().count() > MAX_ALIAS_LENGTH {
        return Err(AppError::validation(
            "Invalid short code",
            json!({ "max_length": MAX_ALIAS_LENGTH }),
        ));
    }
    Ok(())
}
