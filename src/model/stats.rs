use std::collections::BTreeMap;

use serde::Serialize;

/// A scraped statistic cell, typed by its textual shape.
///
/// Serializes untagged so output keeps the shape of the source data:
/// a pair becomes `{"landed": 92, "attempted": 250}`, a clock becomes
/// total seconds, and so on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Pair { landed: i64, attempted: i64 },
    Count(i64),
    Seconds(u32),
    Percent(f64),
    /// Fallback for text that matches no numeric shape. Callers decide
    /// whether an unconverted value is an error.
    Text(String),
}

/// One fighter's statistics for a single fight, overwritten wholesale
/// on each scrape. Keys are the source's row labels ("Head", "Control",
/// "Take Downs", ...).
#[derive(Debug, Clone, Serialize)]
pub struct FighterStats {
    pub name: String,
    pub stats: BTreeMap<String, StatValue>,
}

impl FighterStats {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stats: BTreeMap::new(),
        }
    }
}

/// Per-round significant-strike breakdown, merged with the overall
/// landed/attempted pair from the totals table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignificantStrikes {
    pub overall: Option<StatValue>,
    pub head: Option<StatValue>,
    pub body: Option<StatValue>,
    pub leg: Option<StatValue>,
    pub distance: Option<StatValue>,
    pub clinch: Option<StatValue>,
    pub ground: Option<StatValue>,
}

/// One round of a stats-source fight page, merging the totals table and
/// the significant-strikes table for a single fighter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoundStats {
    pub round: u8,
    pub knockdowns: Option<StatValue>,
    pub significant_strikes: SignificantStrikes,
    pub significant_strike_pct: Option<StatValue>,
    pub total_strikes: Option<StatValue>,
    pub takedowns: Option<StatValue>,
    pub takedown_pct: Option<StatValue>,
    pub submission_attempts: Option<StatValue>,
    pub reversals: Option<StatValue>,
    pub control: Option<StatValue>,
}
