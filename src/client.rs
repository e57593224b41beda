use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{instrument, warn};

use crate::config::OddsConfig;
use crate::error::Result;
use crate::model::*;
use crate::pipeline::{self, ExecutionMode, PipelineOutput};
use crate::{odds_api, scraper};

/// Per-page navigation timeout; on expiry the fetch counts as a failure
/// and is skipped, never retried.
const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(15);

/// Some sources block default HTTP clients; present a browser.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

/// The main entry point for scraping MMA data.
///
/// `MmaClient` wraps a [`reqwest::Client`] shared across all fetches of
/// a run and exposes one method per scrape operation: stats-source
/// event listings, fighter bios, per-round fight stats, fightcenter
/// cards, decisions events with judge scorecards, and odds pulls.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> mma_scraper::Result<()> {
/// use mma_scraper::{ExecutionMode, MmaClient};
///
/// let client = MmaClient::new();
/// let run = client
///     .get_decision_events(2024, 2025, ExecutionMode::default())
///     .await?;
/// println!(
///     "scraped {} events, skipped {} pages",
///     run.events.len(),
///     run.report.skipped.len()
/// );
/// # Ok(())
/// # }
/// ```
pub struct MmaClient {
    http: reqwest::Client,
}

impl MmaClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(NAVIGATION_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { http }
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { http: client }
    }

    /// Fetch the stats-source event listing (completed or upcoming).
    #[instrument(skip(self))]
    pub async fn get_stats_events(&self, listing: EventListing) -> Result<Vec<StatsEvent>> {
        scraper::stats_events::get_stats_events(&self.http, listing).await
    }

    /// The most recent completed stats-source event, if any.
    #[instrument(skip(self))]
    pub async fn get_latest_stats_event(&self) -> Result<Option<StatsEvent>> {
        let events = self.get_stats_events(EventListing::Completed).await?;
        let today = Utc::now().date_naive();
        Ok(scraper::stats_events::latest_completed(&events, today).cloned())
    }

    /// Fetch a fighter bio page by the stats-source fighter id.
    #[instrument(skip(self))]
    pub async fn get_fighter(&self, fighter_id: &str) -> Result<FighterBio> {
        scraper::fighter_bio::get_fighter(&self.http, fighter_id).await
    }

    /// Per-round statistics for one fighter on a stats-source fight page.
    #[instrument(skip(self))]
    pub async fn get_round_stats(
        &self,
        fight_url: &str,
        fighter_url: &str,
    ) -> Result<Vec<RoundStats>> {
        scraper::fight_stats::get_round_stats(&self.http, fight_url, fighter_url).await
    }

    /// All fights on a fightcenter card. `completed` selects the result
    /// grammar: finished cards carry a method, live cards do not.
    #[instrument(skip(self))]
    pub async fn get_fightcenter_card(&self, card_id: u64, completed: bool) -> Result<Vec<Fight>> {
        scraper::fightcenter::get_card(&self.http, card_id, completed).await
    }

    /// Card detail URLs for one fightcenter year.
    #[instrument(skip(self))]
    pub async fn get_fightcenter_card_urls(&self, year: u16) -> Result<Vec<String>> {
        scraper::fightcenter::get_card_urls(&self.http, year).await
    }

    /// Scrape decisions events for a span of years, with judge
    /// scorecards per fight and each event reconciled against the
    /// stats source. Per-page failures end up in the run report.
    #[instrument(skip(self))]
    pub async fn get_decision_events(
        &self,
        start_year: i32,
        end_year: i32,
        mode: ExecutionMode,
    ) -> Result<PipelineOutput> {
        let stats_events = self.matching_candidates().await;
        let mut report = pipeline::RunReport::default();
        let urls =
            pipeline::collect_event_urls(&self.http, start_year, end_year, &mut report).await;
        let mut output =
            pipeline::scrape_decision_events(&self.http, urls, mode, &stats_events).await;
        output.report.skipped.extend(report.skipped);
        Ok(output)
    }

    /// Scrape only the most recently listed decisions event.
    #[instrument(skip(self))]
    pub async fn get_latest_decision_event(
        &self,
        mode: ExecutionMode,
    ) -> Result<PipelineOutput> {
        let url = scraper::decisions::get_latest_event_url(&self.http).await?;
        let stats_events = self.matching_candidates().await;
        let urls = url.into_iter().collect();
        Ok(pipeline::scrape_decision_events(&self.http, urls, mode, &stats_events).await)
    }

    /// One poll of current odds. Callers polling live append successive
    /// snapshots; no state is retained here.
    #[instrument(skip(self, config))]
    pub async fn get_live_odds(&self, config: &OddsConfig) -> Result<OddsSnapshot> {
        odds_api::get_live_odds(&self.http, config).await
    }

    /// Historical closing odds for specific upstream event ids at a
    /// point in time.
    #[instrument(skip(self, config))]
    pub async fn get_closing_odds(
        &self,
        config: &OddsConfig,
        date: DateTime<Utc>,
        event_ids: &[String],
    ) -> Result<HistoricalOdds> {
        odds_api::get_closing_odds(&self.http, config, date, event_ids).await
    }

    /// Stats-source candidates for cross-source matching. A failed
    /// listing fetch disables matching for the run instead of aborting it.
    async fn matching_candidates(&self) -> Vec<StatsEvent> {
        match self.get_stats_events(EventListing::Completed).await {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, "stats-source listing unavailable, matching disabled");
                vec![]
            }
        }
    }

    /// Stats-source candidates restricted to events on or after `cutoff`.
    pub async fn get_stats_events_since(&self, cutoff: NaiveDate) -> Result<Vec<StatsEvent>> {
        let events = self.get_stats_events(EventListing::Completed).await?;
        Ok(scraper::stats_events::events_after(events, cutoff))
    }
}

impl Default for MmaClient {
    fn default() -> Self {
        Self::new()
    }
}
