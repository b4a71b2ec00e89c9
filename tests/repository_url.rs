//! Postgres repository tests. Run with a database:
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo test --test repository_url -- --ignored
//! ```

use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tinylink::domain::entities::NewLink;
use tinylink::domain::repositories::{
    LinkRepository, SequenceRepository, StatsRepository, URL_SEQUENCE,
};
use tinylink::error::AppError;
use tinylink::infrastructure::persistence::{
    PgLinkRepository, PgSequenceRepository, PgStatsRepository,
};

fn new_link(code: &str, url: &str) -> NewLink {
    NewLink {
        code: code.to_string(),
        long_url: url.to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_find(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .create(new_link("abc123", "https://example.com/"))
        .await
        .unwrap();
    assert_eq!(link.code, "abc123");
    assert_eq!(link.clicks, 0);
    assert!(link.last_accessed.is_none());

    let found = repo.find_by_code("abc123").await.unwrap().unwrap();
    assert_eq!(found.id, link.id);
    assert_eq!(found.long_url, "https://example.com/");

    assert!(repo.find_by_code("missing").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_code_conflicts(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("dup", "https://a.example/"))
        .await
        .unwrap();
    let err = repo
        .create(new_link("dup", "https://b.example/"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    assert!(repo.ping().await.is_ok());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_record_click_updates_counters(pool: PgPool) {
    let pool = Arc::new(pool);
    let links = PgLinkRepository::new(pool.clone());
    let stats = PgStatsRepository::new(pool);

    links
        .create(new_link("clicked", "https://example.com/"))
        .await
        .unwrap();

    let later = Utc::now();
    let earlier = later - Duration::hours(1);

    assert!(stats.record_click("clicked", later).await.unwrap());
    assert!(stats.record_click("clicked", earlier).await.unwrap());

    let result = stats.get_stats("clicked").await.unwrap().unwrap();
    assert_eq!(result.clicks, 2);

    let last = result.last_accessed.unwrap();
    assert!((last - later).num_milliseconds().abs() < 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_record_click_unknown_code(pool: PgPool) {
    let stats = PgStatsRepository::new(Arc::new(pool));

    assert!(!stats.record_click("ghost", Utc::now()).await.unwrap());
    assert!(stats.get_stats("ghost").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_sequence_increments(pool: PgPool) {
    let repo = PgSequenceRepository::new(Arc::new(pool));

    assert_eq!(repo.next_value(URL_SEQUENCE).await.unwrap(), 1);
    assert_eq!(repo.next_value(URL_SEQUENCE).await.unwrap(), 2);
    assert_eq!(repo.next_value("other").await.unwrap(), 1);
}
