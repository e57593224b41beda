use chrono::NaiveDate;
use itertools::Itertools;
use ::scraper::Selector;
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::model::{EventListing, StatsEvent};
use crate::scraper::{self, element_text};

const LISTING_URL: &str = "http://ufcstats.com/statistics/events";
const EVENT_DATE_FORMAT: &str = "%B %d, %Y";

#[instrument(skip(client))]
pub(crate) async fn get_stats_events(
    client: &reqwest::Client,
    listing: EventListing,
) -> Result<Vec<StatsEvent>> {
    // The completed listing paginates; page=all flattens it.
    let url = match listing {
        EventListing::Completed => format!("{LISTING_URL}/{listing}?page=all"),
        EventListing::Upcoming => format!("{LISTING_URL}/{listing}"),
    };
    let document = scraper::get_document(client, &url).await?;
    let events = parse_stats_events(&document)?;
    debug!(count = events.len(), "parsed stats-source event listing");
    Ok(events)
}

pub(crate) fn parse_stats_events(document: &scraper::Html) -> Result<Vec<StatsEvent>> {
    let row_selector = Selector::parse("tr.b-statistics__table-row")?;
    let link_selector = Selector::parse("a.b-link")?;
    let date_selector = Selector::parse("span.b-statistics__date")?;
    let location_selector =
        Selector::parse("td.b-statistics__table-col.b-statistics__table-col_style_big-top-padding")?;

    let mut events = vec![];
    for row in document.select(&row_selector) {
        let Some(link) = row.select(&link_selector).next() else {
            continue;
        };
        let href = link.value().attr("href").unwrap_or_default().trim();
        let Some(id) = href.split("/event-details/").nth(1) else {
            continue;
        };
        let name = element_text(&link);

        let date = row.select(&date_selector).next().map(|e| element_text(&e));
        let date = match date {
            Some(raw) => match NaiveDate::parse_from_str(&raw, EVENT_DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(e) => {
                    warn!(%raw, error = %e, "unparseable event date");
                    None
                }
            },
            None => continue,
        };

        let location = row
            .select(&location_selector)
            .next()
            .map(|e| element_text(&e))
            .unwrap_or_default();

        events.push(StatsEvent {
            id: id.to_string(),
            name,
            date,
            location,
            href: href.to_string(),
        });
    }
    Ok(events)
}

/// The most recent completed event dated on or before `today`.
pub(crate) fn latest_completed<'a>(
    events: &'a [StatsEvent],
    today: NaiveDate,
) -> Option<&'a StatsEvent> {
    events
        .iter()
        .filter(|e| e.date.is_some_and(|d| d <= today))
        .max_by_key(|e| e.date)
}

/// Events dated on or after `cutoff`, the slice handed to the
/// cross-source matcher.
pub(crate) fn events_after(events: Vec<StatsEvent>, cutoff: NaiveDate) -> Vec<StatsEvent> {
    events
        .into_iter()
        .filter(|e| e.date.is_some_and(|d| d >= cutoff))
        .collect_vec()
}
