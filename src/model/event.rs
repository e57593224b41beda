use chrono::NaiveDate;
use serde::Serialize;
use strum_macros::EnumString;

use crate::model::FightScorecards;

/// Filter for the stats-source event listing to retrieve. Renders as
/// the listing URL path segment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum EventListing {
    Completed,
    Upcoming,
}

/// A single event row from the stats-source listing.
///
/// The id is the opaque token from the event-details URL and is the
/// canonical identifier other sources get reconciled onto.
#[derive(Debug, Clone, Serialize)]
pub struct StatsEvent {
    pub id: String,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub location: String,
    pub href: String,
}

/// Name, date and location scraped from a decisions event page.
///
/// Every field is best-effort; an unparseable date leaves the event
/// out of cross-source matching but not out of the result set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventDetails {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub location: String,
}

/// A fully scraped decisions event: details, the matched stats-source
/// event id (when reconciliation succeeded) and all scored fights.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionEvent {
    pub event_url: String,
    pub details: EventDetails,
    pub stats_event_id: Option<String>,
    pub fights: Vec<FightScorecards>,
}
