use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::OddsConfig;
use crate::error::{MmaError, Result};
use crate::model::{HistoricalOdds, OddsEvent, OddsSnapshot};

const LIVE_ODDS_URL: &str = "https://api.the-odds-api.com/v4/sports/mma_mixed_martial_arts/odds";
const HISTORICAL_ODDS_URL: &str =
    "https://api.the-odds-api.com/v4/historical/sports/mma_mixed_martial_arts/odds";

/// One poll of current odds across bookmakers, h2h market, decimal
/// prices. Live-polling callers append successive snapshots.
#[instrument(skip(client, config))]
pub(crate) async fn get_live_odds(
    client: &reqwest::Client,
    config: &OddsConfig,
) -> Result<OddsSnapshot> {
    let params = [
        ("apiKey", config.api_key.as_str()),
        ("regions", "us,us2"),
        ("markets", "h2h"),
        ("dateFormat", "iso"),
        ("oddsFormat", "decimal"),
        ("includeLinks", "true"),
        ("includeSids", "true"),
        ("includeBetLimits", "true"),
    ];
    let events: Vec<OddsEvent> = get_json(client, LIVE_ODDS_URL, &params).await?;
    debug!(count = events.len(), "fetched live odds");
    Ok(OddsSnapshot {
        timestamp: Utc::now(),
        events,
    })
}

/// Closing odds for specific upstream event ids as captured at `date`.
#[instrument(skip(client, config, event_ids), fields(events = event_ids.len()))]
pub(crate) async fn get_closing_odds(
    client: &reqwest::Client,
    config: &OddsConfig,
    date: DateTime<Utc>,
    event_ids: &[String],
) -> Result<HistoricalOdds> {
    let date = date.format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let ids = event_ids.join(",");
    let params = [
        ("apiKey", config.api_key.as_str()),
        ("dateFormat", "iso"),
        ("regions", "us,us2"),
        ("oddsFormat", "decimal"),
        ("markets", "h2h,spreads"),
        ("eventIds", ids.as_str()),
        ("date", date.as_str()),
    ];
    let snapshot: HistoricalOdds = get_json(client, HISTORICAL_ODDS_URL, &params).await?;
    debug!(count = snapshot.data.len(), "fetched closing odds");
    Ok(snapshot)
}

async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    params: &[(&str, &str)],
) -> Result<T> {
    let response = client
        .get(url)
        .query(params)
        .send()
        .await
        .map_err(|e| MmaError::Http {
            url: url.to_owned(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(MmaError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    response.json().await.map_err(|e| MmaError::ResponseJson {
        url: url.to_owned(),
        source: e,
    })
}
