//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};

/// A redirect that still has to be counted.
///
/// Created by the redirect handler and sent through a bounded channel to
/// [`crate::domain::click_worker::run_click_worker`], so the redirect
/// response never waits on a database write.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub code: String,
    pub accessed_at: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates an event stamped with the current time.
    pub fn now(code: impl Into<String>) -> Self {
        Self::at(code, Utc::now())
    }

    /// Creates an event with an explicit access time.
    pub fn at(code: impl Into<String>, accessed_at: DateTime<Utc>) -> Self {
        Self {
            code: code.into(),
            accessed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_now() {
        let before = Utc::now();
        let event = ClickEvent::now("abc");
        let after = Utc::now();

        assert_eq!(event.code, "abc");
        assert!(event.accessed_at >= before && event.accessed_at <= after);
    }

    #[test]
    fn test_click_event_at() {
        let ts = Utc::now();
        let event = ClickEvent::at(String::from("xyz"), ts);

        assert_eq!(event, ClickEvent::at("xyz", ts));
    }
}
