pub(crate) mod decisions;
pub(crate) mod fight_stats;
pub(crate) mod fightcenter;
pub(crate) mod fighter_bio;
pub(crate) mod stats_events;

pub(crate) use ::scraper::Html;
use ::scraper::ElementRef;
use tracing::debug;

use crate::error::{MmaError, Result};

/// Fetch a URL and parse the response body as an HTML document.
pub(crate) async fn get_document(client: &reqwest::Client, url: &str) -> Result<Html> {
    debug!(url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| MmaError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(MmaError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| MmaError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    Ok(Html::parse_document(&body))
}

/// All text of an element, whitespace-collapsed.
pub(crate) fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(|t| t.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve a possibly relative href against a site base URL.
pub(crate) fn absolute_url(base: &str, href: &str) -> String {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            href.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("https://mmadecisions.com", "decision/12345/x"),
            "https://mmadecisions.com/decision/12345/x"
        );
        assert_eq!(
            absolute_url("https://mmadecisions.com/", "/decision/12345/x"),
            "https://mmadecisions.com/decision/12345/x"
        );
        assert_eq!(
            absolute_url("https://mmadecisions.com", "http://ufcstats.com/event-details/abc"),
            "http://ufcstats.com/event-details/abc"
        );
    }

    #[test]
    fn test_element_text() {
        let html = Html::parse_fragment("<div> Judge \n <b>One</b>\t28 </div>");
        let root = html.root_element();
        assert_eq!(element_text(&root), "Judge One 28");
    }
}
