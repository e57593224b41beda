use serde::Serialize;

/// A decisions fight page: the two fighters and one scorecard per judge.
///
/// A complete fight carries exactly three scorecards; pages with fewer
/// are dropped by the pipeline as a data-quality defect.
#[derive(Debug, Clone, Serialize)]
pub struct FightScorecards {
    pub fight_url: String,
    pub fighter1: String,
    pub fighter2: String,
    pub scorecards: Vec<JudgeScorecard>,
}

/// One judge's card for a fight.
#[derive(Debug, Clone, Serialize)]
pub struct JudgeScorecard {
    pub judge_name: String,
    pub rounds: Vec<RoundScore>,
    pub total: Option<ScoreTotal>,
}

/// Per-round points for both fighters. Rows scored with a `-`
/// placeholder never become a `RoundScore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundScore {
    pub round: u8,
    pub fighter1: u8,
    pub fighter2: u8,
}

/// The card's total row, when the page provides one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreTotal {
    pub fighter1: u16,
    pub fighter2: u16,
}
