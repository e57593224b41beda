use serde::Serialize;

use crate::model::FighterStats;

/// One bout from a fightcenter card page.
#[derive(Debug, Clone, Serialize)]
pub struct Fight {
    pub fighter1: FighterStats,
    pub fighter2: FighterStats,
    pub result: FightResult,
}

/// Outcome fields for a fight, all optional: live fights have no method
/// yet and pre-fight segments have nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FightResult {
    /// Method of victory ("KO/TKO", "U Dec", ...) or a lifecycle tag
    /// ("PRE-FIGHT", "WALKOUTS", "INTROS") for fights not yet underway.
    pub method: Option<String>,
    /// Round label as displayed, e.g. "R3".
    pub round: Option<String>,
    /// Clock within the round, e.g. "2:30".
    pub time: Option<String>,
    /// Seconds elapsed since the opening bell, modeling every round as a
    /// fixed 5-minute block.
    pub timestamp: Option<u32>,
    /// Winner's name when the page marks one.
    pub winner: Option<String>,
}
