use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::StatValue;

/// Win/loss/draw record; parenthetical no-contest counts are stripped
/// before parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FightRecord {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

/// A fighter bio page snapshot from the stats source.
#[derive(Debug, Clone, Serialize)]
pub struct FighterBio {
    pub id: String,
    pub name: String,
    pub nickname: String,
    pub record: FightRecord,
    /// Height in total inches.
    pub height_in: Option<u32>,
    /// Weight in pounds.
    pub weight_lbs: Option<u32>,
    /// Reach in inches.
    pub reach_in: Option<u32>,
    pub stance: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Career rate statistics keyed by the source's labels
    /// ("SLpM", "Str. Acc.", "TD Avg.", ...).
    pub career: BTreeMap<String, StatValue>,
}
