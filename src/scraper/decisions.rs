use std::collections::HashSet;

use chrono::NaiveDate;
use itertools::Itertools;
use ::scraper::{ElementRef, Selector};
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::model::{EventDetails, FightScorecards, JudgeScorecard, RoundScore, ScoreTotal};
use crate::scraper::{self, absolute_url, element_text};

const BASE_URL: &str = "https://mmadecisions.com";
const EVENT_DATE_FORMAT: &str = "%B %d, %Y";

/// A complete fight carries one table per judge.
const JUDGES_PER_FIGHT: usize = 3;

#[instrument(skip(client))]
pub(crate) async fn get_event_urls(client: &reqwest::Client, year: i32) -> Result<Vec<String>> {
    let url = format!("{BASE_URL}/decisions-by-event/{year}/");
    let document = scraper::get_document(client, &url).await?;
    let urls = parse_event_urls(&document)?;
    debug!(year, count = urls.len(), "parsed decisions event listing");
    Ok(urls)
}

/// The first event on the decisions-by-event front page, i.e. the most
/// recently added one.
#[instrument(skip(client))]
pub(crate) async fn get_latest_event_url(client: &reqwest::Client) -> Result<Option<String>> {
    let url = format!("{BASE_URL}/decisions-by-event/");
    let document = scraper::get_document(client, &url).await?;
    Ok(parse_event_urls(&document)?.into_iter().next())
}

fn parse_event_urls(document: &scraper::Html) -> Result<Vec<String>> {
    let selector = Selector::parse("tr.decision td.list a[href]")?;
    Ok(document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| absolute_url(BASE_URL, href))
        .collect_vec())
}

/// Event details plus the de-duplicated fight URLs on the page.
/// De-duplication has set semantics; ordering is not preserved.
#[instrument(skip(client))]
pub(crate) async fn get_event(
    client: &reqwest::Client,
    event_url: &str,
) -> Result<(EventDetails, Vec<String>)> {
    let document = scraper::get_document(client, event_url).await?;
    let details = parse_event_details(&document)?;
    let fights = parse_fight_urls(&document)?;
    debug!(event_url, name = %details.name, fights = fights.len(), "parsed event page");
    Ok((details, fights))
}

pub(crate) fn parse_event_details(document: &scraper::Html) -> Result<EventDetails> {
    let name_selector = Selector::parse("tr.top-row td.decision-top2")?;
    let date_selector = Selector::parse("tr.bottom-row td.decision-bottom2")?;

    let mut details = EventDetails::default();
    if let Some(cell) = document.select(&name_selector).next() {
        // First text chunk is the event name, the rest is the venue and city.
        let parts = cell
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect_vec();
        if let Some((name, location)) = parts.split_first() {
            details.name = name.to_string();
            details.location = location.join(", ");
        }
    }
    if let Some(cell) = document.select(&date_selector).next() {
        let raw = element_text(&cell);
        match NaiveDate::parse_from_str(&raw, EVENT_DATE_FORMAT) {
            Ok(date) => details.date = Some(date),
            Err(e) => warn!(%raw, error = %e, "unparseable decisions event date"),
        }
    }
    Ok(details)
}

fn parse_fight_urls(document: &scraper::Html) -> Result<Vec<String>> {
    let selector = Selector::parse("td.list2 a[href^='decision/']")?;
    let urls: HashSet<String> = document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| absolute_url(BASE_URL, href))
        .collect();
    Ok(urls.into_iter().collect_vec())
}

/// Fetch and extract one fight page. `Ok(None)` means the page had fewer
/// than three judge tables; the fight is dropped as a data-quality
/// defect rather than emitted partially.
#[instrument(skip(client))]
pub(crate) async fn get_fight(
    client: &reqwest::Client,
    fight_url: &str,
) -> Result<Option<FightScorecards>> {
    let document = scraper::get_document(client, fight_url).await?;
    parse_fight(fight_url, &document)
}

pub(crate) fn parse_fight(
    fight_url: &str,
    document: &scraper::Html,
) -> Result<Option<FightScorecards>> {
    let fighter_selector = Selector::parse("td.decision-top a, td.decision-bottom a")?;
    let fighters = document
        .select(&fighter_selector)
        .map(|a| element_text(&a))
        .collect_vec();
    let (fighter1, fighter2) = match fighters.as_slice() {
        [first, second, ..] => (first.clone(), second.clone()),
        _ => {
            // Names stay unset; downstream treats every field as optional.
            warn!(fight_url, "could not extract both fighter names");
            (String::new(), String::new())
        }
    };

    // Judge tables are only identifiable by their inline style.
    let table_selector =
        Selector::parse(r#"table[style="border-spacing: 1px; width: 100%"]"#)?;
    let tables = document.select(&table_selector).collect_vec();
    if tables.len() < JUDGES_PER_FIGHT {
        warn!(
            fight_url,
            found = tables.len(),
            "expected {JUDGES_PER_FIGHT} judge tables, dropping fight"
        );
        return Ok(None);
    }

    // Only the first three tables count, in case the page grows others.
    let scorecards = tables
        .iter()
        .take(JUDGES_PER_FIGHT)
        .filter_map(|table| parse_scorecard(table).transpose())
        .collect::<Result<Vec<_>>>()?;

    // A table can still fail to yield a card (no judge cell); the
    // completeness rule applies to cards, not tables.
    if scorecards.len() < JUDGES_PER_FIGHT {
        warn!(
            fight_url,
            found = scorecards.len(),
            "fewer than {JUDGES_PER_FIGHT} usable scorecards, dropping fight"
        );
        return Ok(None);
    }

    Ok(Some(FightScorecards {
        fight_url: fight_url.to_string(),
        fighter1,
        fighter2,
        scorecards,
    }))
}

fn parse_scorecard(table: &ElementRef) -> Result<Option<JudgeScorecard>> {
    let judge_selector = Selector::parse("td.judge")?;
    let row_selector = Selector::parse("tr.decision")?;
    let total_selector = Selector::parse("tr.bottom-row td")?;
    let cell_selector = Selector::parse("td")?;

    let Some(judge_cell) = table.select(&judge_selector).next() else {
        warn!("judge cell not found in scorecard table");
        return Ok(None);
    };
    let judge_name = judge_cell
        .text()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .unwrap_or_default()
        .to_string();

    let mut rounds = vec![];
    for row in table.select(&row_selector) {
        let cells = row.select(&cell_selector).collect_vec();
        let [round, fighter1, fighter2, ..] = cells.as_slice() else {
            continue;
        };
        let (round, fighter1, fighter2) = (
            element_text(round),
            element_text(fighter1),
            element_text(fighter2),
        );
        // A "-" placeholder means the round was not scored; the row is
        // dropped, never zero-filled.
        if fighter1 == "-" || fighter2 == "-" {
            continue;
        }
        let (Ok(round), Ok(fighter1), Ok(fighter2)) =
            (round.parse(), fighter1.parse(), fighter2.parse())
        else {
            continue;
        };
        rounds.push(RoundScore {
            round,
            fighter1,
            fighter2,
        });
    }

    let total = table
        .select(&total_selector)
        .collect_vec()
        .get(1..3)
        .and_then(|cells| {
            let fighter1 = element_text(&cells[0]).parse().ok()?;
            let fighter2 = element_text(&cells[1]).parse().ok()?;
            Some(ScoreTotal { fighter1, fighter2 })
        });

    Ok(Some(JudgeScorecard {
        judge_name,
        rounds,
        total,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::Html;

    fn judge_table(judge: &str, rows: &str, total: Option<(u16, u16)>) -> String {
        let total_row = total
            .map(|(a, b)| {
                format!(
                    "<tr class=\"bottom-row\"><td>TOTAL</td><td>{a}</td><td>{b}</td></tr>"
                )
            })
            .unwrap_or_default();
        format!(
            r#"<table style="border-spacing: 1px; width: 100%">
                 <tr><td class="judge">{judge}<br>Nevada</td></tr>
                 {rows}{total_row}
               </table>"#
        )
    }

    fn fight_page(tables: &[String]) -> Html {
        let html = format!(
            r#"<html><body>
                 <table>
                   <tr><td class="decision-top"><a href="fighter/1">Jon Jones</a></td></tr>
                   <tr><td class="decision-bottom"><a href="fighter/2">Stipe Miocic</a></td></tr>
                 </table>
                 {}
               </body></html>"#,
            tables.join("\n")
        );
        Html::parse_document(&html)
    }

    const ROWS: &str = r#"
        <tr class="decision"><td>1</td><td>10</td><td>9</td></tr>
        <tr class="decision"><td>2</td><td>9</td><td>10</td></tr>
        <tr class="decision"><td>3</td><td>-</td><td>-</td></tr>
    "#;

    #[test]
    fn test_parse_fight_complete() {
        let tables = vec![
            judge_table("Sal D'Amato", ROWS, Some((19, 19))),
            judge_table("Derek Cleary", ROWS, Some((19, 19))),
            judge_table("Mike Bell", ROWS, None),
        ];
        let document = fight_page(&tables);
        let fight = parse_fight("https://mmadecisions.com/decision/1/x", &document)
            .unwrap()
            .unwrap();

        assert_eq!(fight.fighter1, "Jon Jones");
        assert_eq!(fight.fighter2, "Stipe Miocic");
        assert_eq!(fight.scorecards.len(), 3);

        let card = &fight.scorecards[0];
        assert_eq!(card.judge_name, "Sal D'Amato");
        // The "-" row is excluded entirely, not zero-filled.
        assert_eq!(
            card.rounds,
            vec![
                RoundScore {
                    round: 1,
                    fighter1: 10,
                    fighter2: 9
                },
                RoundScore {
                    round: 2,
                    fighter1: 9,
                    fighter2: 10
                },
            ]
        );
        assert_eq!(
            card.total,
            Some(ScoreTotal {
                fighter1: 19,
                fighter2: 19
            })
        );
        assert_eq!(fight.scorecards[2].total, None);
    }

    #[test]
    fn test_parse_fight_unusable_judge_table() {
        // Three tables, but one has no judge cell: the fight is dropped
        // whole, not emitted with two scorecards.
        let broken = format!(
            r#"<table style="border-spacing: 1px; width: 100%">
                 <tr><td>no judge here</td></tr>
                 {ROWS}
               </table>"#
        );
        let tables = vec![
            judge_table("Sal D'Amato", ROWS, None),
            broken,
            judge_table("Mike Bell", ROWS, None),
        ];
        let document = fight_page(&tables);
        let fight = parse_fight("https://mmadecisions.com/decision/1/x", &document).unwrap();
        assert!(fight.is_none());
    }

    #[test]
    fn test_parse_fight_too_few_scorecards() {
        let tables = vec![
            judge_table("Sal D'Amato", ROWS, None),
            judge_table("Derek Cleary", ROWS, None),
        ];
        let document = fight_page(&tables);
        let fight = parse_fight("https://mmadecisions.com/decision/1/x", &document).unwrap();
        assert!(fight.is_none());
    }

    #[test]
    fn test_parse_fight_is_idempotent() {
        let tables = vec![
            judge_table("A", ROWS, None),
            judge_table("B", ROWS, None),
            judge_table("C", ROWS, None),
        ];
        let document = fight_page(&tables);
        let first = parse_fight("u", &document).unwrap().unwrap();
        let second = parse_fight("u", &document).unwrap().unwrap();
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn test_parse_event_details() {
        let document = Html::parse_document(
            r#"<table>
                 <tr class="top-row"><td class="decision-top2">
                   UFC 309: Jones vs Miocic<br>Madison Square Garden<br>New York City, New York
                 </td></tr>
                 <tr class="bottom-row"><td class="decision-bottom2">November 16, 2024</td></tr>
               </table>"#,
        );
        let details = parse_event_details(&document).unwrap();
        assert_eq!(details.name, "UFC 309: Jones vs Miocic");
        assert_eq!(
            details.location,
            "Madison Square Garden, New York City, New York"
        );
        assert_eq!(details.date, NaiveDate::from_ymd_opt(2024, 11, 16));
    }

    #[test]
    fn test_parse_event_details_bad_date() {
        let document = Html::parse_document(
            r#"<table>
                 <tr class="top-row"><td class="decision-top2">UFC on ABC</td></tr>
                 <tr class="bottom-row"><td class="decision-bottom2">sometime soon</td></tr>
               </table>"#,
        );
        let details = parse_event_details(&document).unwrap();
        assert_eq!(details.name, "UFC on ABC");
        assert_eq!(details.date, None);
    }

    #[test]
    fn test_parse_fight_urls_deduplicates() {
        let document = Html::parse_document(
            r#"<table>
                 <td class="list2"><a href="decision/100/a-vs-b">A vs B</a></td>
                 <td class="list2"><a href="decision/100/a-vs-b">A vs B</a></td>
                 <td class="list2"><a href="decision/200/c-vs-d">C vs D</a></td>
                 <td class="list2"><a href="event/300">not a fight</a></td>
               </table>"#,
        );
        let mut urls = parse_fight_urls(&document).unwrap();
        urls.sort();
        assert_eq!(
            urls,
            vec![
                "https://mmadecisions.com/decision/100/a-vs-b",
                "https://mmadecisions.com/decision/200/c-vs-d",
            ]
        );
    }
}
