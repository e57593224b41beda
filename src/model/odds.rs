use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One poll of the live odds endpoint: everything the API returned,
/// stamped with the poll time. Appended to a growing sequence by
/// live-polling callers.
#[derive(Debug, Clone, Serialize)]
pub struct OddsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub events: Vec<OddsEvent>,
}

/// A historical odds pull: a point-in-time view the API captured at
/// `timestamp`, with neighbor snapshot times for paging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalOdds {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub previous_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: Vec<OddsEvent>,
}

/// An upcoming or live fight as the odds API describes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsEvent {
    pub id: String,
    #[serde(default)]
    pub sport_key: String,
    pub commence_time: DateTime<Utc>,
    #[serde(default)]
    pub home_team: Option<String>,
    #[serde(default)]
    pub away_team: Option<String>,
    #[serde(default)]
    pub bookmakers: Vec<Bookmaker>,
}

/// One bookmaker's markets for an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmaker {
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(default)]
    pub markets: Vec<Market>,
}

/// A priced market (h2h, spreads, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    pub key: String,
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

/// A decimal price quote for one side of a market.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<f64>,
}
