use itertools::Itertools;
use ::scraper::{ElementRef, Selector};
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::model::{Fight, FighterStats};
use crate::normalize::{parse_round_result, parse_stat_value};
use crate::scraper::{self, element_text};

const ESPN_BASE: &str = "https://www.espn.com";

/// Result strip classes differ between finished and in-progress cards.
const FINAL_RESULT_SELECTOR: &str =
    "div.ScoreCell__Time.Gamestrip__Time.ScoreCell__Time--post.clr-gray-01";
const LIVE_RESULT_SELECTOR: &str =
    "div.ScoreCell__Time.Gamestrip__Time.Gamestrip__Time--noOverview.ScoreCell__Time--in.clr-negative";

#[instrument(skip(client))]
pub(crate) async fn get_card(
    client: &reqwest::Client,
    fight_id: u64,
    completed: bool,
) -> Result<Vec<Fight>> {
    let url = format!("{ESPN_BASE}/mma/fightcenter/_/id/{fight_id}/league/ufc");
    let document = scraper::get_document(client, &url).await?;
    let fights = parse_card(&document, completed)?;
    debug!(fight_id, count = fights.len(), "parsed fightcenter card");
    Ok(fights)
}

/// Card detail URLs for one year of the fightcenter, from the page's
/// event dropdown.
#[instrument(skip(client))]
pub(crate) async fn get_card_urls(client: &reqwest::Client, year: u16) -> Result<Vec<String>> {
    let url = format!("{ESPN_BASE}/mma/fightcenter/_/league/ufc/year/{year}");
    let document = scraper::get_document(client, &url).await?;
    let urls = parse_card_urls(&document)?;
    debug!(year, count = urls.len(), "parsed fightcenter card urls");
    Ok(urls)
}

pub(crate) fn parse_card_urls(document: &scraper::Html) -> Result<Vec<String>> {
    let option_selector = Selector::parse("select.dropdown__select option[data-url]")?;
    Ok(document
        .select(&option_selector)
        .filter_map(|opt| opt.value().attr("data-url"))
        .filter(|url| *url != "#")
        .map(|url| format!("{ESPN_BASE}{url}"))
        .collect_vec())
}

pub(crate) fn parse_card(document: &scraper::Html, completed: bool) -> Result<Vec<Fight>> {
    let segment_selector = Selector::parse("div.mb6")?;
    Ok(document
        .select(&segment_selector)
        .filter_map(|segment| parse_fight_segment(&segment, completed))
        .collect_vec())
}

fn parse_fight_segment(segment: &ElementRef, completed: bool) -> Option<Fight> {
    let name_selector = Selector::parse("span.truncate.tc.db").ok()?;
    let names = segment
        .select(&name_selector)
        .map(|e| element_text(&e))
        .collect_vec();
    let [name1, name2, ..] = names.as_slice() else {
        warn!("fight segment without two fighter names, skipping");
        return None;
    };
    let mut fighter1 = FighterStats::new(name1.clone());
    let mut fighter2 = FighterStats::new(name2.clone());

    let result_selector = if completed {
        Selector::parse(FINAL_RESULT_SELECTOR).ok()?
    } else {
        Selector::parse(LIVE_RESULT_SELECTOR).ok()?
    };
    let mut result = segment
        .select(&result_selector)
        .next()
        .map(|e| parse_round_result(&element_text(&e), completed))
        .unwrap_or_default();

    let victory_selector = Selector::parse(r#"[data-testid="gameStripBarVictory"]"#).ok()?;
    result.winner = segment
        .select(&victory_selector)
        .next()
        .map(|e| element_text(&e));

    let matchup_selector = Selector::parse(r#"[data-wrapping="MMAMatchup"] li"#).ok()?;
    let value_selector = Selector::parse("div.MMAMatchup__Stat.ns8.MMAMatchup__Stat__Text").ok()?;
    let label_selector = Selector::parse("div.ns9.fw-medium.ttu.nowrap.clr-gray-04").ok()?;
    for row in segment.select(&matchup_selector) {
        let values = row.select(&value_selector).map(|e| element_text(&e)).collect_vec();
        let [left, right] = values.as_slice() else {
            continue;
        };
        let Some(label) = row.select(&label_selector).next() else {
            continue;
        };
        let label = element_text(&label);
        fighter1.stats.insert(label.clone(), parse_stat_value(left));
        fighter2.stats.insert(label, parse_stat_value(right));
    }

    Some(Fight {
        fighter1,
        fighter2,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StatValue;
    use crate::scraper::Html;

    fn stat_row(label: &str, left: &str, right: &str) -> String {
        format!(
            r#"<li>
                 <div class="MMAMatchup__Stat ns8 MMAMatchup__Stat__Text">{left}</div>
                 <div class="ns9 fw-medium ttu nowrap clr-gray-04">{label}</div>
                 <div class="MMAMatchup__Stat ns8 MMAMatchup__Stat__Text">{right}</div>
               </li>"#
        )
    }

    fn card_page(result_classes: &str, result_text: &str, with_victory: bool) -> Html {
        let victory = if with_victory {
            r#"<div data-testid="gameStripBarVictory">John Doe</div>"#
        } else {
            ""
        };
        let rows = [
            stat_row("TOT Strikes", "95 of 254", "88 of 200"),
            stat_row("Control", "0:50", "2:10"),
            stat_row("Take Downs", "0 of 6", "3 of 5"),
        ]
        .join("");
        let html = format!(
            r#"<div class="mb6">
                 <span class="truncate tc db">John Doe</span>
                 <span class="truncate tc db">Jane Smith</span>
                 <div class="{result_classes}"><div>{result_text}</div></div>
                 {victory}
                 <div data-wrapping="MMAMatchup"><ul>{rows}</ul></div>
               </div>"#
        );
        Html::parse_document(&html)
    }

    #[test]
    fn test_parse_completed_card() {
        let document = card_page(
            "ScoreCell__Time Gamestrip__Time ScoreCell__Time--post clr-gray-01",
            "FinalKO/TKOR3, 2:30",
            true,
        );
        let fights = parse_card(&document, true).unwrap();
        assert_eq!(fights.len(), 1);

        let fight = &fights[0];
        assert_eq!(fight.fighter1.name, "John Doe");
        assert_eq!(fight.fighter2.name, "Jane Smith");
        assert_eq!(fight.result.method.as_deref(), Some("KO/TKO"));
        assert_eq!(fight.result.round.as_deref(), Some("R3"));
        assert_eq!(fight.result.time.as_deref(), Some("2:30"));
        assert_eq!(fight.result.timestamp, Some(750));
        assert_eq!(fight.result.winner.as_deref(), Some("John Doe"));

        assert_eq!(
            fight.fighter1.stats.get("TOT Strikes"),
            Some(&StatValue::Pair {
                landed: 95,
                attempted: 254
            })
        );
        assert_eq!(
            fight.fighter2.stats.get("Control"),
            Some(&StatValue::Seconds(130))
        );
        assert_eq!(
            fight.fighter2.stats.get("Take Downs"),
            Some(&StatValue::Pair {
                landed: 3,
                attempted: 5
            })
        );
    }

    #[test]
    fn test_parse_live_card() {
        let document = card_page(
            "ScoreCell__Time Gamestrip__Time Gamestrip__Time--noOverview ScoreCell__Time--in clr-negative",
            "END R2",
            false,
        );
        let fights = parse_card(&document, false).unwrap();
        let fight = &fights[0];
        assert_eq!(fight.result.method, None);
        assert_eq!(fight.result.round.as_deref(), Some("R2"));
        assert_eq!(fight.result.time, None);
        assert_eq!(fight.result.winner, None);
    }

    #[test]
    fn test_segment_without_names_is_skipped() {
        let document = Html::parse_document(r#"<div class="mb6"><p>tba</p></div>"#);
        let fights = parse_card(&document, true).unwrap();
        assert!(fights.is_empty());
    }

    #[test]
    fn test_parse_card_urls() {
        let document = Html::parse_document(
            r##"<select class="dropdown__select">
                 <option data-url="#">Choose</option>
                 <option data-url="/mma/fightcenter/_/id/600040033/league/ufc">UFC 309</option>
                 <option data-url="/mma/fightcenter/_/id/600040034/league/ufc">UFC 310</option>
               </select>"##,
        );
        let urls = parse_card_urls(&document).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://www.espn.com/mma/fightcenter/_/id/600040033/league/ufc",
                "https://www.espn.com/mma/fightcenter/_/id/600040034/league/ufc",
            ]
        );
    }
}
