//! Redirect load driver.
//!
//! Fires a fixed number of `GET /{code}` requests with bounded concurrency
//! and reports throughput. Redirects are not followed, so only the
//! shortener itself is measured.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client as HttpClient;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use url::Url;

use super::{ClientError, ShortenerClient};

pub const DEFAULT_LOAD_REQUESTS: usize = 2000;
pub const DEFAULT_LOAD_CONCURRENCY: usize = 50;

/// How many requests to send and how many may be in flight at once.
#[derive(Debug, Clone, Copy)]
pub struct LoadPlan {
    pub requests: usize,
    pub concurrency: usize,
}

impl Default for LoadPlan {
    fn default() -> Self {
        Self {
            requests: DEFAULT_LOAD_REQUESTS,
            concurrency: DEFAULT_LOAD_CONCURRENCY,
        }
    }
}

/// Outcome of a load run.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub requests: usize,
    pub elapsed: Duration,
    /// Response count per HTTP status.
    pub statuses: BTreeMap<u16, usize>,
    /// Requests that got no response at all.
    pub failures: usize,
}

impl LoadReport {
    pub fn requests_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.requests as f64 / secs
        } else {
            0.0
        }
    }

    /// Responses with a 3xx status.
    pub fn redirects(&self) -> usize {
        self.statuses
            .range(300..400)
            .map(|(_, count)| count)
            .sum()
    }
}

impl ShortenerClient {
    /// Sends `plan.requests` redirect requests for `code`.
    ///
    /// Per-request transport errors are counted in the report rather than
    /// aborting the run.
    ///
    /// # Errors
    ///
    /// - [`ClientError::EmptyCode`] without issuing a request
    /// - [`ClientError::Config`] if the request URL cannot be built
    pub async fn redirect_load(
        &self,
        code: &str,
        plan: LoadPlan,
    ) -> Result<LoadReport, ClientError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ClientError::EmptyCode);
        }

        let url = self.endpoint(&[code])?;
        let permits = Arc::new(Semaphore::new(plan.concurrency.max(1)));
        let mut in_flight = JoinSet::new();
        let started = Instant::now();

        for _ in 0..plan.requests {
            let Ok(permit) = permits.clone().acquire_owned().await else {
                break;
            };

            let http = self.http.clone();
            let url = url.clone();
            in_flight.spawn(async move {
                let status = fetch_status(&http, url).await;
                drop(permit);
                status
            });
        }

        let mut report = LoadReport {
            requests: plan.requests,
            ..LoadReport::default()
        };

        while let Some(joined) = in_flight.join_next().await {
            match joined {
                Ok(Ok(status)) => *report.statuses.entry(status).or_default() += 1,
                Ok(Err(e)) => {
                    debug!("Load request failed: {}", e);
                    report.failures += 1;
                }
                Err(e) => {
                    warn!("Load task aborted: {}", e);
                    report.failures += 1;
                }
            }
        }

        report.elapsed = started.elapsed();
        Ok(report)
    }
}

async fn fetch_status(http: &HttpClient, url: Url) -> Result<u16, reqwest::Error> {
    let response = http.get(url).send().await?;
    let status = response.status().as_u16();
    response.bytes().await?;
    Ok(status)
}
