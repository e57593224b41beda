//! Drives extraction over event listings and merges sub-results.
//!
//! Each run is an explicit value: collected events plus a report of the
//! pages that were skipped and why. One bad page never aborts its
//! siblings; partial results beat total failure.

use std::collections::HashSet;
use std::future::Future;

use futures::future::join_all;
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{instrument, warn};

use crate::matching;
use crate::model::{DecisionEvent, StatsEvent};
use crate::scraper::decisions;

pub const DEFAULT_MAX_IN_FLIGHT: usize = 5;

/// How page fetches are dispatched. Both modes produce the same record
/// set for the same input pages; only wall-clock time differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One operation at a time; the reference mode for correctness.
    Sequential,
    /// Up to `max_in_flight` fetches at once; excess work waits for a slot.
    Concurrent { max_in_flight: usize },
}

impl Default for ExecutionMode {
    fn default() -> Self {
        ExecutionMode::Concurrent {
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

/// A page left out of the result set, and why.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedPage {
    pub url: String,
    pub reason: String,
}

/// Side report of everything a run skipped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub skipped: Vec<SkippedPage>,
}

impl RunReport {
    fn skip(&mut self, url: impl Into<String>, reason: impl Into<String>) {
        let (url, reason) = (url.into(), reason.into());
        warn!(%url, %reason, "skipping page");
        self.skipped.push(SkippedPage { url, reason });
    }
}

/// The result of one pipeline run: successfully extracted events and
/// the skip report. Never retained across runs.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub events: Vec<DecisionEvent>,
    pub report: RunReport,
}

/// Run `f` over `items`, either one at a time or behind a fixed-size
/// semaphore. Results come back in submission order in both modes.
pub(crate) async fn run_bounded<I, T, F, Fut>(mode: ExecutionMode, items: Vec<I>, f: F) -> Vec<T>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = T>,
{
    match mode {
        ExecutionMode::Sequential => {
            let mut results = Vec::with_capacity(items.len());
            for item in items {
                results.push(f(item).await);
            }
            results
        }
        ExecutionMode::Concurrent { max_in_flight } => {
            let semaphore = Semaphore::new(max_in_flight.max(1));
            let tasks = items.into_iter().map(|item| {
                let semaphore = &semaphore;
                let f = &f;
                async move {
                    let _permit = semaphore.acquire().await.ok();
                    f(item).await
                }
            });
            join_all(tasks).await
        }
    }
}

/// De-duplicated event URLs for a span of listing years, newest first.
/// A failed listing page is reported and the other years proceed.
#[instrument(skip(client, report))]
pub(crate) async fn collect_event_urls(
    client: &reqwest::Client,
    start_year: i32,
    end_year: i32,
    report: &mut RunReport,
) -> Vec<String> {
    let (low, high) = if start_year <= end_year {
        (start_year, end_year)
    } else {
        (end_year, start_year)
    };
    let mut seen = HashSet::new();
    for year in (low..=high).rev() {
        match decisions::get_event_urls(client, year).await {
            Ok(urls) => seen.extend(urls),
            Err(e) => report.skip(format!("decisions listing for {year}"), e.to_string()),
        }
    }
    seen.into_iter().collect()
}

/// Scrape every decisions event page in `event_urls`, reconciling each
/// against the stats-source candidates. Event output is an unordered
/// collection; under the concurrent mode result order follows the
/// (already unordered) input URL set.
pub(crate) async fn scrape_decision_events(
    client: &reqwest::Client,
    event_urls: Vec<String>,
    mode: ExecutionMode,
    stats_events: &[StatsEvent],
) -> PipelineOutput {
    let results = run_bounded(mode, event_urls, |url| {
        scrape_event(client, url, stats_events)
    })
    .await;

    let mut events = vec![];
    let mut report = RunReport::default();
    for (event, skipped) in results {
        events.extend(event);
        report.skipped.extend(skipped);
    }
    PipelineOutput { events, report }
}

/// One event page and all its fight pages. Fight pages with fewer than
/// three scorecards are dropped whole, not emitted partially.
async fn scrape_event(
    client: &reqwest::Client,
    event_url: String,
    stats_events: &[StatsEvent],
) -> (Option<DecisionEvent>, Vec<SkippedPage>) {
    let mut report = RunReport::default();

    let (details, fight_urls) = match decisions::get_event(client, &event_url).await {
        Ok(parsed) => parsed,
        Err(e) => {
            report.skip(&event_url, e.to_string());
            return (None, report.skipped);
        }
    };

    let mut fights = vec![];
    for fight_url in fight_urls {
        match decisions::get_fight(client, &fight_url).await {
            Ok(Some(fight)) => fights.push(fight),
            Ok(None) => report.skip(&fight_url, "fewer than three judge scorecards"),
            Err(e) => report.skip(&fight_url, e.to_string()),
        }
    }

    let stats_event_id =
        matching::match_event(&details, stats_events).map(|m| m.stats_event_id);

    let event = DecisionEvent {
        event_url,
        details,
        stats_event_id,
        fights,
    };
    (Some(event), report.skipped)
}
