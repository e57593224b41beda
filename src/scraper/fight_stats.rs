use std::collections::BTreeMap;

use itertools::Itertools;
use ::scraper::{ElementRef, Selector};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::{RoundStats, SignificantStrikes, StatValue};
use crate::normalize::parse_stat_value;
use crate::scraper::{self, element_text};

/// Column order of the per-round totals table, after the fighter column.
const TOTALS_COLUMNS: [&str; 9] = [
    "KD",
    "Sig. str.",
    "Sig. str. %",
    "Total str.",
    "Td",
    "Td %",
    "Sub. att",
    "Rev.",
    "Ctrl",
];

/// Column order of the significant-strikes table, after the fighter
/// column. Only the positional breakdown columns are kept; the overall
/// pair comes from the totals table.
const BREAKDOWN_COLUMNS: [&str; 8] = [
    "Sig. str.",
    "Sig. str. %",
    "Head",
    "Body",
    "Leg",
    "Distance",
    "Clinch",
    "Ground",
];

const BREAKDOWN_KEEP: [&str; 6] = ["Head", "Body", "Leg", "Distance", "Clinch", "Ground"];

#[instrument(skip(client))]
pub(crate) async fn get_round_stats(
    client: &reqwest::Client,
    fight_url: &str,
    fighter_url: &str,
) -> Result<Vec<RoundStats>> {
    let document = scraper::get_document(client, fight_url).await?;
    let rounds = parse_round_stats(&document, fighter_url)?;
    debug!(fight_url, rounds = rounds.len(), "parsed per-round stats");
    Ok(rounds)
}

pub(crate) fn parse_round_stats(
    document: &scraper::Html,
    fighter_url: &str,
) -> Result<Vec<RoundStats>> {
    let section_selector = Selector::parse("section.b-fight-details__section.js-fight-section")?;
    let header_selector =
        Selector::parse("a.b-fight-details__collapse-link_rnd.js-fight-collapse-link")?;
    let table_selector = Selector::parse("table.b-fight-details__table")?;

    // Round keyed pair of (totals, breakdown) stat maps, merged at the end.
    let mut rounds: BTreeMap<u8, (RawStats, RawStats)> = BTreeMap::new();
    let mut fighter_index: Option<usize> = None;

    for section in document.select(&section_selector) {
        let is_per_round = section
            .select(&header_selector)
            .next()
            .is_some_and(|a| element_text(&a).contains("Per round"));
        if !is_per_round {
            continue;
        }
        for table in section.select(&table_selector) {
            parse_table(&table, fighter_url, &mut rounds, &mut fighter_index)?;
        }
    }

    Ok(rounds
        .into_iter()
        .map(|(round, (totals, breakdown))| merge_round(round, totals, breakdown))
        .collect_vec())
}

type RawStats = BTreeMap<String, StatValue>;

fn parse_table(
    table: &ElementRef,
    fighter_url: &str,
    rounds: &mut BTreeMap<u8, (RawStats, RawStats)>,
    fighter_index: &mut Option<usize>,
) -> Result<()> {
    let th_selector = Selector::parse("th")?;
    let headers = table.select(&th_selector).map(|th| element_text(&th)).collect_vec();
    let columns: &[&str] = if headers.iter().any(|h| h == "KD") {
        &TOTALS_COLUMNS
    } else if headers.iter().any(|h| h == "Head") {
        &BREAKDOWN_COLUMNS
    } else {
        return Ok(());
    };
    let is_totals = columns.len() == TOTALS_COLUMNS.len();

    // Round headers and stat rows interleave in document order.
    let row_selector = Selector::parse("thead, tr")?;
    let cell_selector = Selector::parse("td")?;
    let value_selector = Selector::parse("p.b-fight-details__table-text")?;

    let mut current_round: Option<u8> = None;
    for row in table.select(&row_selector) {
        if row.value().name() == "thead" {
            if let Some(round) = round_number(&element_text(&row)) {
                current_round = Some(round);
                rounds.entry(round).or_default();
            }
            continue;
        }
        let Some(round) = current_round else {
            continue;
        };
        let cells = row.select(&cell_selector).collect_vec();
        let [fighter_cell, stat_cells @ ..] = cells.as_slice() else {
            continue;
        };
        if stat_cells.is_empty() {
            continue;
        }
        if fighter_index.is_none() {
            *fighter_index = Some(detect_fighter_index(fighter_cell, fighter_url).unwrap_or(0));
        }
        let index = fighter_index.unwrap_or(0);

        let entry = rounds.entry(round).or_default();
        let target = if is_totals { &mut entry.0 } else { &mut entry.1 };
        for (cell, column) in stat_cells.iter().zip(columns) {
            if !is_totals && !BREAKDOWN_KEEP.contains(column) {
                continue;
            }
            let Some(raw) = cell
                .select(&value_selector)
                .map(|p| element_text(&p))
                .nth(index)
            else {
                continue;
            };
            target.insert(column.to_string(), parse_stat_value(&raw));
        }
    }
    Ok(())
}

/// Which of the two fighters in the first column is the requested one,
/// by comparing profile link URLs.
fn detect_fighter_index(cell: &ElementRef, fighter_url: &str) -> Option<usize> {
    let link_selector = Selector::parse("a").ok()?;
    let wanted = fighter_url.trim_end_matches('/');
    cell.select(&link_selector).position(|a| {
        let href = a.value().attr("href").unwrap_or_default().trim_end_matches('/');
        !href.is_empty() && (href.contains(wanted) || wanted.contains(href))
    })
}

fn round_number(text: &str) -> Option<u8> {
    let mut tokens = text.split_whitespace();
    while let Some(token) = tokens.next() {
        if token.eq_ignore_ascii_case("round") {
            return tokens.next()?.parse().ok();
        }
    }
    None
}

fn merge_round(round: u8, mut totals: RawStats, mut breakdown: RawStats) -> RoundStats {
    RoundStats {
        round,
        knockdowns: totals.remove("KD"),
        significant_strikes: SignificantStrikes {
            overall: totals.remove("Sig. str."),
            head: breakdown.remove("Head"),
            body: breakdown.remove("Body"),
            leg: breakdown.remove("Leg"),
            distance: breakdown.remove("Distance"),
            clinch: breakdown.remove("Clinch"),
            ground: breakdown.remove("Ground"),
        },
        significant_strike_pct: totals.remove("Sig. str. %"),
        total_strikes: totals.remove("Total str."),
        takedowns: totals.remove("Td"),
        takedown_pct: totals.remove("Td %"),
        submission_attempts: totals.remove("Sub. att"),
        reversals: totals.remove("Rev."),
        control: totals.remove("Ctrl"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::Html;

    const FIGHTER_URL: &str = "http://ufcstats.com/fighter-details/c03520b5c88ed6b4";

    fn value_cell(first: &str, second: &str) -> String {
        format!(
            r#"<td><p class="b-fight-details__table-text">{first}</p>
                   <p class="b-fight-details__table-text">{second}</p></td>"#
        )
    }

    fn fight_page() -> Html {
        let fighter_cell = format!(
            r#"<td><p class="b-fight-details__table-text">
                     <a href="{FIGHTER_URL}">Alpha</a></p>
                   <p class="b-fight-details__table-text">
                     <a href="http://ufcstats.com/fighter-details/other">Beta</a></p></td>"#
        );
        let totals_cells = [
            value_cell("1", "0"),
            value_cell("20 of 40", "10 of 30"),
            value_cell("50%", "33%"),
            value_cell("25 of 50", "12 of 35"),
            value_cell("2 of 3", "0 of 1"),
            value_cell("66%", "0%"),
            value_cell("1", "0"),
            value_cell("0", "0"),
            value_cell("2:30", "0:15"),
        ]
        .join("");
        let breakdown_cells = [
            value_cell("20 of 40", "10 of 30"),
            value_cell("50%", "33%"),
            value_cell("12 of 25", "5 of 15"),
            value_cell("5 of 10", "3 of 10"),
            value_cell("3 of 5", "2 of 5"),
            value_cell("15 of 30", "8 of 25"),
            value_cell("3 of 6", "1 of 3"),
            value_cell("2 of 4", "1 of 2"),
        ]
        .join("");
        let html = format!(
            r#"<section class="b-fight-details__section js-fight-section">
                 <a class="b-fight-details__collapse-link_rnd js-fight-collapse-link">
                   Per round</a>
                 <table class="b-fight-details__table">
                   <thead><tr><th>Fighter</th><th>KD</th><th>Sig. str.</th>
                     <th>Sig. str. %</th><th>Total str.</th><th>Td</th><th>Td %</th>
                     <th>Sub. att</th><th>Rev.</th><th>Ctrl</th></tr></thead>
                   <tbody class="b-fight-details__table-body">
                     <thead><tr><th colspan="10">Round 1</th></tr></thead>
                     <tr>{fighter_cell}{totals_cells}</tr>
                   </tbody>
                 </table>
                 <table class="b-fight-details__table">
                   <thead><tr><th>Fighter</th><th>Sig. str.</th><th>Sig. str. %</th>
                     <th>Head</th><th>Body</th><th>Leg</th><th>Distance</th>
                     <th>Clinch</th><th>Ground</th></tr></thead>
                   <tbody class="b-fight-details__table-body">
                     <thead><tr><th colspan="9">Round 1</th></tr></thead>
                     <tr>{fighter_cell}{breakdown_cells}</tr>
                   </tbody>
                 </table>
               </section>"#
        );
        Html::parse_document(&html)
    }

    #[test]
    fn test_parse_round_stats_merges_tables() {
        let rounds = parse_round_stats(&fight_page(), FIGHTER_URL).unwrap();
        assert_eq!(rounds.len(), 1);

        let round = &rounds[0];
        assert_eq!(round.round, 1);
        assert_eq!(round.knockdowns, Some(StatValue::Count(1)));
        assert_eq!(
            round.significant_strikes.overall,
            Some(StatValue::Pair {
                landed: 20,
                attempted: 40
            })
        );
        assert_eq!(
            round.significant_strikes.head,
            Some(StatValue::Pair {
                landed: 12,
                attempted: 25
            })
        );
        assert_eq!(
            round.significant_strikes.ground,
            Some(StatValue::Pair {
                landed: 2,
                attempted: 4
            })
        );
        assert_eq!(round.significant_strike_pct, Some(StatValue::Percent(50.0)));
        assert_eq!(round.control, Some(StatValue::Seconds(150)));
        assert_eq!(
            round.takedowns,
            Some(StatValue::Pair {
                landed: 2,
                attempted: 3
            })
        );
    }

    #[test]
    fn test_fighter_index_selects_second_fighter() {
        let other = "http://ufcstats.com/fighter-details/other";
        let rounds = parse_round_stats(&fight_page(), other).unwrap();
        assert_eq!(rounds[0].knockdowns, Some(StatValue::Count(0)));
        assert_eq!(rounds[0].control, Some(StatValue::Seconds(15)));
    }

    #[test]
    fn test_unknown_fighter_defaults_to_first() {
        let rounds = parse_round_stats(&fight_page(), "http://example.com/nobody").unwrap();
        assert_eq!(rounds[0].knockdowns, Some(StatValue::Count(1)));
    }

    #[test]
    fn test_no_per_round_section() {
        let document = Html::parse_document("<section><table></table></section>");
        let rounds = parse_round_stats(&document, FIGHTER_URL).unwrap();
        assert!(rounds.is_empty());
    }
}
