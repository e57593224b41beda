//! Conversions from raw scraped text into typed values.
//!
//! Source markup is inconsistent and cells go missing, so every function
//! here is total: malformed input degrades to `None` (or passes the
//! original text through) instead of failing.

use crate::model::{FightResult, StatValue};

/// Seconds per round when deriving an absolute fight clock. Every round
/// is modeled as a fixed 5-minute block regardless of actual length.
const ROUND_SECONDS: u32 = 300;

/// Victory methods a completed result string can carry.
const METHODS: [&str; 5] = ["KO/TKO", "S Dec", "U Dec", "Sub", "No Contest"];

/// Lifecycle tags a live fight strip shows before the opening bell.
const LIFECYCLE_TAGS: [&str; 3] = ["PRE-FIGHT", "WALKOUTS", "INTROS"];

/// Convert American odds to decimal odds.
///
/// Positive: `x/100 + 1`. Negative: `100/|x| + 1`. Zero or non-finite
/// input has no decimal representation and yields `None`.
pub fn american_to_decimal(odds: f64) -> Option<f64> {
    if !odds.is_finite() || odds == 0.0 {
        return None;
    }
    if odds > 0.0 {
        Some(odds / 100.0 + 1.0)
    } else {
        Some(100.0 / odds.abs() + 1.0)
    }
}

/// Inverse of [`american_to_decimal`]. Decimal odds at or below 1.0
/// imply no payout and yield `None`.
pub fn decimal_to_american(decimal: f64) -> Option<f64> {
    if !decimal.is_finite() || decimal <= 1.0 {
        return None;
    }
    if decimal >= 2.0 {
        Some((decimal - 1.0) * 100.0)
    } else {
        Some(-100.0 / (decimal - 1.0))
    }
}

/// Parse `"<int> of <int>"` into a landed/attempted pair. Any other
/// shape comes back as [`StatValue::Text`] with the trimmed original.
pub fn parse_quantity_pair(text: &str) -> StatValue {
    let trimmed = text.trim();
    if let Some((lhs, rhs)) = trimmed.split_once(" of ") {
        if let (Ok(landed), Ok(attempted)) =
            (lhs.trim().parse::<i64>(), rhs.trim().parse::<i64>())
        {
            return StatValue::Pair { landed, attempted };
        }
    }
    StatValue::Text(trimmed.to_string())
}

/// Parse a `"M:SS"` clock into total seconds. Values too large for a
/// `u32` are treated as malformed.
pub fn parse_clock(text: &str) -> Option<u32> {
    let (minutes, seconds) = text.trim().split_once(':')?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    let seconds: u32 = seconds.trim().parse().ok()?;
    minutes.checked_mul(60)?.checked_add(seconds)
}

/// Parse a percentage string like `"42%"` into a float.
pub fn parse_percent(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    trimmed.strip_suffix('%')?.trim().parse().ok()
}

/// Convert a height string like `5' 6"` into total inches.
pub fn parse_height(text: &str) -> Option<u32> {
    let (feet, rest) = text.trim().split_once('\'')?;
    let feet: u32 = feet.trim().parse().ok()?;
    let inches: u32 = rest.trim().trim_end_matches('"').trim().parse().ok()?;
    feet.checked_mul(12)?.checked_add(inches)
}

/// First run of digits in the text, for reach (`68"`) and weight
/// (`135 lbs.`) strings.
pub fn first_int(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Type a raw statistic cell by its textual shape.
///
/// A `"---"` placeholder counts as zero; `"X of Y"` becomes a pair, a
/// clock becomes seconds, a trailing `%` becomes a float, a bare integer
/// becomes a count, and anything else passes through as text.
pub fn parse_stat_value(text: &str) -> StatValue {
    let trimmed = text.trim();
    if trimmed == "---" {
        return StatValue::Count(0);
    }
    if trimmed.contains(" of ") {
        return parse_quantity_pair(trimmed);
    }
    if trimmed.contains(':') {
        return match parse_clock(trimmed) {
            Some(seconds) => StatValue::Seconds(seconds),
            None => StatValue::Text(trimmed.to_string()),
        };
    }
    if trimmed.contains('%') {
        return match parse_percent(trimmed) {
            Some(pct) => StatValue::Percent(pct),
            None => StatValue::Text(trimmed.to_string()),
        };
    }
    match trimmed.parse::<i64>() {
        Ok(n) => StatValue::Count(n),
        Err(_) => StatValue::Text(trimmed.to_string()),
    }
}

/// Parse a fight-strip result string into method/round/time.
///
/// Two grammars apply depending on whether the fight has ended:
/// - Completed: `Final<METHOD>R<n>, <M:SS>`, e.g. `FinalKO/TKOR3, 2:30`.
/// - Live: `R<n>, <M:SS>` or `R<n>` with an optional leading `END `,
///   or a lifecycle tag (PRE-FIGHT / WALKOUTS / INTROS) carried through
///   uppercased as the method with round and time unset.
///
/// Any other shape yields an all-`None` result.
pub fn parse_round_result(text: &str, completed: bool) -> FightResult {
    let trimmed = text.trim();
    let (method, round, time) = if completed {
        parse_final_result(trimmed)
    } else {
        parse_live_result(trimmed)
    };
    let timestamp = match (&round, &time) {
        (Some(round), Some(time)) => round_timestamp(round, time),
        _ => None,
    };
    FightResult {
        method,
        round,
        time,
        timestamp,
        winner: None,
    }
}

/// Seconds since the opening bell for a round label ("R3") and a clock
/// within that round, with every round a fixed [`ROUND_SECONDS`] block.
pub fn round_timestamp(round: &str, time: &str) -> Option<u32> {
    let round: u32 = round.trim().strip_prefix('R')?.parse().ok()?;
    let round_index = round.checked_sub(1)?;
    round_index
        .checked_mul(ROUND_SECONDS)?
        .checked_add(parse_clock(time)?)
}

fn parse_final_result(text: &str) -> (Option<String>, Option<String>, Option<String>) {
    let Some(rest) = text.strip_prefix("Final") else {
        return (None, None, None);
    };
    for method in METHODS {
        if let Some(rest) = rest.strip_prefix(method) {
            if let Some((round, time)) = parse_round_and_clock(rest.trim_start()) {
                if let Some(time) = time {
                    return (Some(method.to_string()), Some(round), Some(time));
                }
            }
            return (None, None, None);
        }
    }
    (None, None, None)
}

fn parse_live_result(text: &str) -> (Option<String>, Option<String>, Option<String>) {
    for tag in LIFECYCLE_TAGS {
        if text.eq_ignore_ascii_case(tag) {
            return (Some(tag.to_string()), None, None);
        }
    }
    let rest = text.strip_prefix("END ").map(str::trim).unwrap_or(text);
    match parse_round_and_clock(rest) {
        Some((round, time)) => (None, Some(round), time),
        None => (None, None, None),
    }
}

/// Parse `R<n>` optionally followed by `, <M:SS>`, rejecting trailing
/// junk. The clock is validated but returned in its original form.
fn parse_round_and_clock(text: &str) -> Option<(String, Option<String>)> {
    let rest = text.strip_prefix('R')?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let round = format!("R{digits}");
    let rest = &rest[digits.len()..];
    if rest.is_empty() {
        return Some((round, None));
    }
    let clock = rest.strip_prefix(',')?.trim();
    parse_clock(clock)?;
    Some((round, Some(clock.to_string())))
}
