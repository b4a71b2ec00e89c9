#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, extract::ConnectInfo};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tinylink::application::services::{LinkService, StatsService};
use tinylink::domain::click_event::ClickEvent;
use tinylink::domain::entities::{Link, LinkStats, NewLink};
use tinylink::domain::repositories::{LinkRepository, SequenceRepository, StatsRepository};
use tinylink::error::AppError;
use tinylink::infrastructure::cache::{CacheResult, CacheService, NullCache};
use tinylink::routes::{RouterConfig, app_service};
use tinylink::state::AppState;
use tokio::sync::mpsc;
use tower::Layer;

pub const MACHINE_ID: u32 = 1;

/// Link storage backed by a map, standing in for Postgres.
#[derive(Default)]
pub struct MemoryStore {
    links: Mutex<HashMap<String, Link>>,
    next_id: AtomicI64,
    sequence: AtomicI64,
}

impl MemoryStore {
    pub fn seed(&self, code: &str, long_url: &str) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.links.lock().unwrap().insert(
            code.to_string(),
            Link::new(id, code.to_string(), long_url.to_string(), Utc::now()),
        );
    }

    pub fn get(&self, code: &str) -> Option<Link> {
        self.links.lock().unwrap().get(code).cloned()
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();
        if links.contains_key(&new_link.code) {
            return Err(AppError::conflict(
                "Short code already taken",
                json!({ "constraint": "urls_short_url_key" }),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let link = Link::new(id, new_link.code, new_link.long_url, Utc::now());
        links.insert(link.code.clone(), link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.get(code))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl StatsRepository for MemoryStore {
    async fn record_click(&self, code: &str, accessed_at: DateTime<Utc>) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        match links.get_mut(code) {
            Some(link) => {
                link.clicks += 1;
                link.last_accessed = link.last_accessed.max(Some(accessed_at));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_stats(&self, code: &str) -> Result<Option<LinkStats>, AppError> {
        Ok(self.get(code).map(|link| link.stats()))
    }
}

#[async_trait]
impl SequenceRepository for MemoryStore {
    async fn next_value(&self, _name: &str) -> Result<i64, AppError> {
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Cache backed by a map.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn get(&self, code: &str) -> Option<String> {
        self.entries.lock().unwrap().get(code).cloned()
    }

    pub fn put(&self, code: &str, url: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(code.to_string(), url.to_string());
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        Ok(self.get(short_code))
    }

    async fn set_url(&self, short_code: &str, long_url: &str, _ttl: Option<u64>) -> CacheResult<()> {
        self.put(short_code, long_url);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Cache whose backend is unreachable.
pub struct DownCache;

#[async_trait]
impl CacheService for DownCache {
    async fn get_url(&self, _short_code: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set_url(&self, _: &str, _: &str, _: Option<u64>) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

pub struct TestContext {
    pub state: AppState,
    pub rx: mpsc::Receiver<ClickEvent>,
    pub store: Arc<MemoryStore>,
}

pub fn create_test_state_with(cache: Arc<dyn CacheService>, queue_capacity: usize) -> TestContext {
    let store = Arc::new(MemoryStore::default());
    let (tx, rx) = mpsc::channel(queue_capacity);

    let link_service = Arc::new(LinkService::new(store.clone(), store.clone(), MACHINE_ID));
    let stats_service = Arc::new(StatsService::new(store.clone()));

    TestContext {
        state: AppState::new(link_service, stats_service, cache, tx),
        rx,
        store,
    }
}

pub fn create_test_state() -> TestContext {
    create_test_state_with(Arc::new(NullCache::new()), 100)
}

/// Full application service, including path normalization, with a fixed
/// peer address for the rate limiter.
pub fn test_app(state: AppState, config: &RouterConfig) -> Router {
    Router::new()
        .fallback_service(app_service(state, config).unwrap())
        .layer(MockConnectInfoLayer)
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
