//! Cross-source event reconciliation.
//!
//! Decisions events and stats-source events describe the same real-world
//! cards but share no identifier. Candidates are narrowed by date
//! proximity, then scored by fuzzy similarity of their location strings,
//! and the winner's stats-source id is stitched onto the decisions event.

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;
use tracing::debug;

use crate::model::{EventDetails, StatsEvent};

/// Only events carrying this marker in their name are reconciled; the
/// stats source covers a single organization.
pub const LEAGUE_MARKER: &str = "UFC";

/// Candidates dated further than this from the event are never considered.
const DATE_TOLERANCE_DAYS: i64 = 1;

/// A successful cross-source correspondence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMatch {
    pub stats_event_id: String,
    /// Token-set similarity of the location strings, 0-100.
    pub score: u8,
    pub date_diff_days: i64,
}

/// Select the stats-source event best corresponding to `details`.
///
/// Deterministic given identical inputs and does no I/O; the candidate
/// list is fetched by the caller. `None` is an expected outcome (event
/// absent from the stats source, missing date, or no league marker),
/// not an error.
pub fn match_event(details: &EventDetails, candidates: &[StatsEvent]) -> Option<EventMatch> {
    if !details.name.contains(LEAGUE_MARKER) {
        return None;
    }
    let Some(date) = details.date else {
        debug!(name = %details.name, "event has no parseable date, skipping matching");
        return None;
    };

    let mut best: Option<EventMatch> = None;
    for candidate in candidates {
        let Some(candidate_date) = candidate.date else {
            debug!(id = %candidate.id, "candidate has no parseable date, excluded");
            continue;
        };
        let date_diff_days = (candidate_date - date).num_days().abs();
        if date_diff_days > DATE_TOLERANCE_DAYS {
            continue;
        }
        let score = token_set_ratio(&details.location, &candidate.location);
        // Best score wins; equal scores prefer the closer date, then the
        // first-seen candidate.
        let better = match &best {
            None => true,
            Some(b) => score > b.score || (score == b.score && date_diff_days < b.date_diff_days),
        };
        if better {
            best = Some(EventMatch {
                stats_event_id: candidate.id.clone(),
                score,
                date_diff_days,
            });
        }
    }

    if let Some(m) = &best {
        debug!(
            name = %details.name,
            stats_event_id = %m.stats_event_id,
            score = m.score,
            date_diff_days = m.date_diff_days,
            "matched event across sources"
        );
    } else {
        debug!(name = %details.name, "no stats-source match within date window");
    }
    best
}

/// Token-set similarity of two strings, scored 0-100.
///
/// Insensitive to word order and duplication: both strings are reduced
/// to sorted token sets, and the score is the best pairwise similarity
/// among the shared-token string and each full token string.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let tokens_a = tokens(a);
    let tokens_b = tokens(b);

    let intersection = join(tokens_a.intersection(&tokens_b));
    let only_a = join(tokens_a.difference(&tokens_b));
    let only_b = join(tokens_b.difference(&tokens_a));

    let combined_a = join_nonempty(&intersection, &only_a);
    let combined_b = join_nonempty(&intersection, &only_b);

    [
        ratio(&intersection, &combined_a),
        ratio(&intersection, &combined_b),
        ratio(&combined_a, &combined_b),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

fn tokens(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

fn join<'a>(tokens: impl Iterator<Item = &'a String>) -> String {
    tokens.cloned().collect::<Vec<_>>().join(" ")
}

fn join_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        (false, false) => format!("{head} {tail}"),
    }
}

fn ratio(a: &str, b: &str) -> u8 {
    (normalized_levenshtein(a, b) * 100.0).round() as u8
}
