//! The poll cycle: fan out one task per feed source, wait for all of them,
//! sleep, repeat.
//!
//! Nothing is remembered between cycles. Every cycle re-fetches each feed and
//! re-sends its newest items; the gateway recognizes repeats through the
//! link-derived document id.

use crate::config::Config;
use crate::delivery::{deliver, DeliveryError};
use crate::feed::{fetch_feed, FeedSource};
use crate::payload::NormalizedPayload;
use crate::util::log_excerpt;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Items taken from the head of each feed per cycle.
pub const MAX_ITEMS_PER_SOURCE: usize = 3;

/// Characters of an item title shown in the success log line.
const TITLE_LOG_CHARS: usize = 40;

/// Per-item delivery counts for one source in one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    /// Items taken from the feed (at most [`MAX_ITEMS_PER_SOURCE`])
    pub selected: usize,
    /// Accepted by the gateway with 202
    pub delivered: usize,
    /// Answered by the gateway with any other status
    pub rejected: usize,
    /// Gateway unreachable or timed out
    pub failed: usize,
    /// Payload could not be serialized
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// The feed could not be fetched or parsed; no items were attempted.
    FetchFailed(String),
    /// The worker task panicked or was cancelled.
    TaskFailed(String),
    Processed(DeliveryStats),
}

#[derive(Debug, Clone)]
pub struct SourceReport {
    pub source: Arc<str>,
    pub outcome: SourceOutcome,
}

/// What happened during one cycle, in registry order.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub sources: Vec<SourceReport>,
    pub elapsed: Duration,
}

impl CycleReport {
    pub fn delivered(&self) -> usize {
        self.sources
            .iter()
            .map(|r| match &r.outcome {
                SourceOutcome::Processed(stats) => stats.delivered,
                _ => 0,
            })
            .sum()
    }

    pub fn failed_sources(&self) -> usize {
        self.sources
            .iter()
            .filter(|r| !matches!(r.outcome, SourceOutcome::Processed(_)))
            .count()
    }
}

/// Fetches one source and delivers its newest items.
///
/// A fetch failure ends this source's work for the cycle. Delivery failures
/// are per item: each is logged and the next item is still attempted.
/// `timeout` bounds the fetch and each delivery separately.
pub async fn process_source(
    client: &reqwest::Client,
    source: &FeedSource,
    gateway: &Url,
    timeout: Duration,
) -> SourceReport {
    let items = match fetch_feed(client, &source.address, timeout).await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(source = %source.name, url = %source.address, error = %e, "Failed to fetch feed");
            return SourceReport {
                source: Arc::clone(&source.name),
                outcome: SourceOutcome::FetchFailed(e.to_string()),
            };
        }
    };

    let selected = &items[..items.len().min(MAX_ITEMS_PER_SOURCE)];
    let mut stats = DeliveryStats {
        selected: selected.len(),
        ..DeliveryStats::default()
    };

    for item in selected {
        let payload = NormalizedPayload::from_item(&source.name, item);

        match deliver(client, gateway, &payload, timeout).await {
            Ok(()) => {
                stats.delivered += 1;
                tracing::info!(
                    source = %source.name,
                    title = %log_excerpt(&item.title, TITLE_LOG_CHARS),
                    "Sent"
                );
            }
            Err(DeliveryError::Serialization(e)) => {
                stats.skipped += 1;
                tracing::debug!(source = %source.name, error = %e, "Skipping unserializable item");
            }
            Err(e @ (DeliveryError::Connection(_) | DeliveryError::Timeout)) => {
                stats.failed += 1;
                tracing::warn!(source = %source.name, error = %e, "Connection to gateway failed");
            }
            Err(DeliveryError::Rejected(status)) => {
                stats.rejected += 1;
                tracing::warn!(source = %source.name, status, "Gateway error");
            }
        }
    }

    SourceReport {
        source: Arc::clone(&source.name),
        outcome: SourceOutcome::Processed(stats),
    }
}

/// Drives poll cycles over a fixed set of sources.
pub struct Poller {
    client: reqwest::Client,
    gateway: Arc<Url>,
    sources: Arc<[FeedSource]>,
    interval: Duration,
    request_timeout: Duration,
}

impl Poller {
    pub fn new(config: Config, client: reqwest::Client) -> Self {
        Self {
            client,
            gateway: Arc::new(config.gateway_url),
            sources: config.sources.into(),
            interval: config.poll_interval,
            request_timeout: config.request_timeout,
        }
    }

    /// Runs one cycle: spawns a task per source and returns once every task
    /// has finished, however long the slowest one takes.
    pub async fn run_cycle(&self) -> CycleReport {
        let started = Instant::now();
        tracing::info!(feeds = self.sources.len(), "Polling feeds concurrently");

        let handles: Vec<_> = self
            .sources
            .iter()
            .cloned()
            .map(|source| {
                let client = self.client.clone();
                let gateway = Arc::clone(&self.gateway);
                let timeout = self.request_timeout;
                tokio::spawn(async move { process_source(&client, &source, &gateway, timeout).await })
            })
            .collect();

        let results = join_all(handles).await;

        let sources = self
            .sources
            .iter()
            .zip(results)
            .map(|(source, result)| match result {
                Ok(report) => report,
                Err(e) => {
                    tracing::error!(source = %source.name, error = %e, "Feed task failed");
                    SourceReport {
                        source: Arc::clone(&source.name),
                        outcome: SourceOutcome::TaskFailed(e.to_string()),
                    }
                }
            })
            .collect();

        CycleReport {
            sources,
            elapsed: started.elapsed(),
        }
    }

    /// Polls forever. Returns only if the surrounding future is dropped.
    ///
    /// The sleep starts after the cycle completes, so a cycle that overruns
    /// the interval delays the next one instead of overlapping it.
    pub async fn run_forever(&self) {
        loop {
            let report = self.run_cycle().await;
            tracing::info!(
                delivered = report.delivered(),
                failed_sources = report.failed_sources(),
                elapsed_ms = report.elapsed.as_millis() as u64,
                sleep_secs = self.interval.as_secs(),
                "Cycle complete"
            );
            tokio::time::sleep(self.interval).await;
        }
    }
}
