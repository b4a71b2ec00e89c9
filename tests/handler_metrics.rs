mod common;

use axum_test::TestServer;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use std::collections::HashMap;
use std::sync::Arc;
use tinylink::infrastructure::cache::NullCache;
use tinylink::routes::RouterConfig;

fn counters(recorder: &DebuggingRecorder) -> HashMap<String, u64> {
    recorder
        .snapshotter()
        .snapshot()
        .into_vec()
        .into_iter()
        .filter_map(|(key, _, _, value)| match value {
            DebugValue::Counter(n) => Some((key.key().name().to_string(), n)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_redirect_counters_are_emitted() {
    let recorder = DebuggingRecorder::new();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    metrics::with_local_recorder(&recorder, || {
        runtime.block_on(async {
            let ctx = common::create_test_state_with(Arc::new(NullCache::new()), 1);
            ctx.store.seed("counted", "https://example.com/");
            let server =
                TestServer::new(common::test_app(ctx.state.clone(), &RouterConfig::default()))
                    .unwrap();

            assert_eq!(server.get("/counted").await.status_code(), 307);
            // Queue capacity is 1 and nothing drains it.
            assert_eq!(server.get("/counted").await.status_code(), 307);
            assert_eq!(server.get("/missing").await.status_code(), 404);
        })
    });

    let counters = counters(&recorder);
    assert_eq!(counters.get("tinylink_redirects_total"), Some(&2));
    assert_eq!(counters.get("tinylink_cache_misses_total"), Some(&3));
    assert_eq!(counters.get("tinylink_clicks_dropped_total"), Some(&1));
    assert_eq!(counters.get("tinylink_cache_hits_total"), None);
}
