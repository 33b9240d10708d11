//! Dynamic-content extraction: scroll until the page stops growing, then
//! collect the loaded items

use super::element_text;
use crate::browser::{BrowserError, Session};
use crate::models::{DynamicItem, ItemAttributes};
use scraper::{Html, Selector};
use std::time::Duration;

/// Marker class used by pages that load items dynamically
const ITEM_SELECTOR: &str = ".dynamic-item";

/// Site-specific guesses tried when the marker class matches nothing.
/// Configuration data, not logic; extend as new sites come up.
const FALLBACK_ITEM_SELECTORS: &str = "div[class*='item'], .content-item, .post";

/// Cap on scroll rounds so a page that keeps growing cannot loop forever
const MAX_SCROLL_ROUNDS: usize = 3;

/// Scrape dynamically loaded items: wait briefly for the marker class,
/// scroll to the bottom until the page height stops increasing (at most
/// [`MAX_SCROLL_ROUNDS`] rounds), then collect every item's text and its
/// id/class/data-value attributes.
pub fn scrape(session: &Session, url: &str) -> Vec<DynamicItem> {
    log::info!("Scraping dynamic content from: {}", url);

    match try_scrape(session, url) {
        Ok(items) => {
            log::info!("Found {} dynamic items", items.len());
            items
        }
        Err(e) => {
            log::error!("Error scraping dynamic content: {}", e);
            Vec::new()
        }
    }
}

fn try_scrape(session: &Session, url: &str) -> Result<Vec<DynamicItem>, BrowserError> {
    session.navigate(url)?;

    // The marker class is optional; give it a short head start
    match session.wait_for_selector_with_timeout(ITEM_SELECTOR, Duration::from_secs(5)) {
        Ok(()) => log::info!("Dynamic content loaded"),
        Err(_) => log::info!("No dynamic content matching {} yet", ITEM_SELECTOR),
    }

    log::info!("Scrolling to load all content...");
    let initial_height = session.page_height().ok();
    let rounds = run_scroll_rounds(
        || {
            session.scroll_to_bottom().ok()?;
            session.page_height().ok()
        },
        initial_height,
        MAX_SCROLL_ROUNDS,
    );
    log::info!("Scrolled {} round(s)", rounds);

    let html = session.html()?;
    Ok(parse_dynamic_items(&html))
}

/// Bounded convergence loop: run scroll rounds until the measured page
/// height stops increasing, a measurement fails, or the round cap is hit.
/// Returns the number of rounds executed.
fn run_scroll_rounds<F>(mut round: F, initial_height: Option<f64>, max_rounds: usize) -> usize
where
    F: FnMut() -> Option<f64>,
{
    let mut last_height = initial_height;

    for n in 0..max_rounds {
        let new_height = round();
        if new_height.is_none() || new_height == last_height {
            return n + 1;
        }
        last_height = new_height;
    }

    max_rounds
}

fn parse_dynamic_items(html: &str) -> Vec<DynamicItem> {
    let document = Html::parse_document(html);

    let primary = Selector::parse(ITEM_SELECTOR).unwrap();
    let mut elements: Vec<_> = document.select(&primary).collect();

    if elements.is_empty() {
        let fallback = Selector::parse(FALLBACK_ITEM_SELECTORS).unwrap();
        elements = document.select(&fallback).collect();
    }

    elements
        .into_iter()
        .map(|el| DynamicItem {
            text: element_text(&el),
            attributes: ItemAttributes {
                id: el.value().attr("id").map(str::to_string),
                class: el.value().attr("class").map(str::to_string),
                data_value: el.value().attr("data-value").map(str::to_string),
            },
        })
        .collect()
}
