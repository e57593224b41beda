use std::collections::BTreeMap;

use chrono::NaiveDate;
use itertools::Itertools;
use ::scraper::Selector;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::{FightRecord, FighterBio};
use crate::normalize::{first_int, parse_height, parse_stat_value};
use crate::scraper::{self, element_text};

const FIGHTER_URL: &str = "http://ufcstats.com/fighter-details";
const DOB_FORMAT: &str = "%b %d, %Y";

#[instrument(skip(client))]
pub(crate) async fn get_fighter(client: &reqwest::Client, fighter_id: &str) -> Result<FighterBio> {
    let url = format!("{FIGHTER_URL}/{fighter_id}");
    let document = scraper::get_document(client, &url).await?;
    let bio = parse_fighter(fighter_id, &document)?;
    debug!(fighter_id, name = %bio.name, "parsed fighter bio");
    Ok(bio)
}

pub(crate) fn parse_fighter(id: &str, document: &scraper::Html) -> Result<FighterBio> {
    let name_selector = Selector::parse("span.b-content__title-highlight")?;
    let nickname_selector = Selector::parse("p.b-content__Nickname")?;
    let record_selector = Selector::parse("span.b-content__title-record")?;
    let item_selector = Selector::parse("li.b-list__box-list-item")?;
    let label_selector = Selector::parse("i.b-list__box-item-title")?;

    let name = document
        .select(&name_selector)
        .next()
        .map(|e| element_text(&e))
        .unwrap_or_default();
    let nickname = document
        .select(&nickname_selector)
        .next()
        .map(|e| element_text(&e))
        .unwrap_or_default();
    let record = document
        .select(&record_selector)
        .next()
        .map(|e| parse_record(&element_text(&e)))
        .unwrap_or_default();

    // Bio measurements and career rates share the same list-item markup;
    // known measurement labels are typed, everything else goes into the
    // career map as a raw stat value.
    let mut bio = FighterBio {
        id: id.to_string(),
        name,
        nickname,
        record,
        height_in: None,
        weight_lbs: None,
        reach_in: None,
        stance: None,
        date_of_birth: None,
        career: BTreeMap::new(),
    };
    for item in document.select(&item_selector) {
        let Some(label) = item.select(&label_selector).next() else {
            continue;
        };
        let label_text = element_text(&label);
        let key = label_text.trim_end_matches(':').trim();
        let value = element_text(&item)
            .strip_prefix(&label_text)
            .unwrap_or_default()
            .trim()
            .to_string();
        if value.is_empty() {
            continue;
        }
        match key {
            "Height" => bio.height_in = parse_height(&value),
            "Weight" => bio.weight_lbs = first_int(&value),
            "Reach" => bio.reach_in = first_int(&value),
            "STANCE" | "Stance" => bio.stance = Some(value),
            "DOB" => bio.date_of_birth = NaiveDate::parse_from_str(&value, DOB_FORMAT).ok(),
            _ => {
                bio.career.insert(key.to_string(), parse_stat_value(&value));
            }
        }
    }
    Ok(bio)
}

/// Parse a `"19-4-0"` record string; parenthetical no-contest counts
/// like `"0 (1 NC)"` are stripped first. Malformed records degrade to
/// all zeroes.
fn parse_record(text: &str) -> FightRecord {
    let record = text.replace("Record:", "");
    let parts = record
        .split('-')
        .map(|part| part.split('(').next().unwrap_or_default().trim())
        .collect_vec();
    let [wins, losses, draws] = parts.as_slice() else {
        return FightRecord::default();
    };
    match (wins.parse(), losses.parse(), draws.parse()) {
        (Ok(wins), Ok(losses), Ok(draws)) => FightRecord {
            wins,
            losses,
            draws,
        },
        _ => FightRecord::default(),
    }
}
