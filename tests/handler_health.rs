mod common;

use axum_test::TestServer;
use std::sync::Arc;
use tinylink::routes::RouterConfig;

fn server(ctx: &common::TestContext) -> TestServer {
    TestServer::new(common::test_app(ctx.state.clone(), &RouterConfig::default())).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let ctx = common::create_test_state();
    let server = server(&ctx);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["click_queue"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_health_degraded_when_cache_down() {
    let ctx = common::create_test_state_with(Arc::new(common::DownCache), 100);
    let server = server(&ctx);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["cache"]["status"], "error");
}

#[tokio::test]
async fn test_health_degraded_when_queue_closed() {
    let common::TestContext { state, rx, .. } = common::create_test_state();
    drop(rx);
    let server = TestServer::new(common::test_app(state, &RouterConfig::default())).unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);
    assert_eq!(
        response.json::<serde_json::Value>()["checks"]["click_queue"]["status"],
        "error"
    );
}
