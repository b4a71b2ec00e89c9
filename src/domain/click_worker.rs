//! Background worker that applies click events to storage.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::StatsRepository;

/// Retries after the first failed update.
const MAX_RETRIES: usize = 3;

/// Consumes click events until every sender is dropped.
///
/// Up to `concurrency` updates run at once. Each update is retried with
/// jittered exponential backoff; an event that still fails is logged and
/// dropped. On shutdown the queue is drained and in-flight updates are
/// awaited before returning.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<dyn StatsRepository>,
    concurrency: usize,
) {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut in_flight = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let repository = repository.clone();
        in_flight.spawn(async move {
            apply_click(repository, event).await;
            drop(permit);
        });

        while in_flight.try_join_next().is_some() {}
    }

    while in_flight.join_next().await.is_some() {}
    info!("Click worker stopped");
}

async fn apply_click(repository: Arc<dyn StatsRepository>, event: ClickEvent) {
    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_secs(1))
        .map(jitter)
        .take(MAX_RETRIES);

    let accessed_at = event.accessed_at;
    let result = Retry::spawn(strategy, || {
        let repository = repository.clone();
        let code = event.code.clone();
        async move { repository.record_click(&code, accessed_at).await }
    })
    .await;

    match result {
        Ok(true) => debug!("Recorded click for {}", event.code),
        Ok(false) => debug!("Click for unknown code {} ignored", event.code),
        Err(e) => {
            metrics::counter!("tinylink_clicks_failed_total").increment(1);
            warn!("Failed to record click for {}: {}", event.code, e);
        }
    }
}
