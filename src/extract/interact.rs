//! Interactive extraction: click, scroll and form submission before
//! collecting result items

use super::element_text;
use crate::browser::{BrowserError, Session};
use crate::models::{ResultItem, StepOutcome};
use scraper::{Html, Selector};
use std::time::Duration;

const LOAD_MORE_SELECTOR: &str = ".load-more";
const SEARCH_BOX_SELECTOR: &str = "input[name='search']";
const SEARCH_SUBMIT_SELECTOR: &str = "input[type='submit']";
const SEARCH_RESULTS_SELECTOR: &str = ".search-results";
const RESULT_ITEM_SELECTOR: &str = ".result-item";

/// Fixed query typed into the search form when one is present
const SEARCH_QUERY: &str = "web scraping";

/// Pause after clicking the load-more control
const CLICK_PAUSE: Duration = Duration::from_secs(2);

/// Scrape a page that needs interaction first. Best-effort steps run in
/// order: click an optional "load more" control, scroll to the bottom,
/// submit a search form if one exists. A failing step is logged and never
/// aborts the rest. Finally every result item's text and first link are
/// collected.
pub fn scrape(session: &Session, url: &str) -> Vec<ResultItem> {
    log::info!("Scraping with interaction: {}", url);

    match try_scrape(session, url) {
        Ok(items) => {
            log::info!("Found {} result items", items.len());
            items
        }
        Err(e) => {
            log::error!("Error during interaction scraping: {}", e);
            Vec::new()
        }
    }
}

fn try_scrape(session: &Session, url: &str) -> Result<Vec<ResultItem>, BrowserError> {
    session.navigate(url)?;

    click_load_more(session).log("load-more button");

    if let Err(e) = session.scroll_to_bottom() {
        log::warn!("scroll to bottom: failed: {}", e);
    }

    submit_search(session).log("search form");

    let html = session.html()?;
    Ok(parse_result_items(&html))
}

/// Click the optional "load more" control if it becomes clickable within
/// 5 seconds; its absence is normal
fn click_load_more(session: &Session) -> StepOutcome {
    match session.wait_for_clickable(LOAD_MORE_SELECTOR, Duration::from_secs(5)) {
        Ok(()) => match session.click(LOAD_MORE_SELECTOR) {
            Ok(()) => {
                std::thread::sleep(CLICK_PAUSE);
                StepOutcome::Applied
            }
            Err(e) => StepOutcome::Failed(e.to_string()),
        },
        Err(BrowserError::Timeout(_)) => StepOutcome::NotFound,
        Err(e) => StepOutcome::Failed(e.to_string()),
    }
}

/// Fill and submit the search form if the page has one, then wait for the
/// results container
fn submit_search(session: &Session) -> StepOutcome {
    match session.element_exists(SEARCH_BOX_SELECTOR) {
        Ok(true) => {}
        Ok(false) => return StepOutcome::NotFound,
        Err(e) => return StepOutcome::Failed(e.to_string()),
    }

    let run = || -> Result<(), BrowserError> {
        session.clear_field(SEARCH_BOX_SELECTOR)?;
        session.type_into(SEARCH_BOX_SELECTOR, SEARCH_QUERY)?;
        session.click(SEARCH_SUBMIT_SELECTOR)?;
        session.wait_for_selector_with_timeout(SEARCH_RESULTS_SELECTOR, Duration::from_secs(10))
    };

    match run() {
        Ok(()) => StepOutcome::Applied,
        Err(e) => StepOutcome::Failed(e.to_string()),
    }
}

fn parse_result_items(html: &str) -> Vec<ResultItem> {
    let document = Html::parse_document(html);
    let item_sel = Selector::parse(RESULT_ITEM_SELECTOR).unwrap();
    let link_sel = Selector::parse("a").unwrap();

    document
        .select(&item_sel)
        .map(|item| {
            let link = item
                .select(&link_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(|h| h.to_string());

            ResultItem {
                text: element_text(&item),
                link,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"
        <html><body>
            <div class="search-results">
                <div class="result-item">
                    First hit
                    <a href="https://example.com/1">open</a>
                    <a href="https://example.com/1-alt">alt</a>
                </div>
                <div class="result-item">Bare hit without link</div>
            </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_result_items() {
        let items = parse_result_items(RESULTS_PAGE);

        assert_eq!(items.len(), 2);
        assert!(items[0].text.starts_with("First hit"));
        // Only the first link of an item is captured
        assert_eq!(items[0].link.as_deref(), Some("https://example.com/1"));
        assert_eq!(items[1].text, "Bare hit without link");
        assert_eq!(items[1].link, None);
    }

    #[test]
    fn test_parse_result_items_none_found() {
        assert!(parse_result_items("<html><body></body></html>").is_empty());
    }
}
