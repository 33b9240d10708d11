//! Tabular extraction: every HTML table on a page

use super::element_text;
use crate::browser::{BrowserError, Session};
use crate::models::TableData;
use scraper::{Html, Selector};

/// Scrape every table on the page, in document order. Headers come from
/// `thead th` cells, or the first row's `th` cells; the header row is not
/// repeated in the body rows. Returns an empty vec if the page has no
/// tables or cannot be loaded.
pub fn scrape(session: &Session, url: &str) -> Vec<TableData> {
    log::info!("Scraping table data from: {}", url);

    match try_scrape(session, url) {
        Ok(tables) => {
            if tables.is_empty() {
                log::info!("No tables found on this page");
            }
            for table in &tables {
                log::info!(
                    "Table {}: {} rows, {} columns",
                    table.table_index + 1,
                    table.rows.len(),
                    table.headers.len()
                );
            }
            tables
        }
        Err(e) => {
            log::error!("Error scraping table data: {}", e);
            Vec::new()
        }
    }
}

fn try_scrape(session: &Session, url: &str) -> Result<Vec<TableData>, BrowserError> {
    session.navigate(url)?;
    let html = session.html()?;
    Ok(parse_tables(&html))
}

fn parse_tables(html: &str) -> Vec<TableData> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table").unwrap();
    let thead_th_sel = Selector::parse("thead th").unwrap();
    let tr_sel = Selector::parse("tr").unwrap();
    let th_sel = Selector::parse("th").unwrap();
    let td_sel = Selector::parse("td").unwrap();

    document
        .select(&table_sel)
        .enumerate()
        .map(|(table_index, table)| {
            // Explicit header row first, otherwise th cells of the first row
            let mut headers: Vec<String> = table
                .select(&thead_th_sel)
                .map(|th| element_text(&th))
                .collect();

            if headers.is_empty() {
                if let Some(first_row) = table.select(&tr_sel).next() {
                    headers = first_row.select(&th_sel).map(|th| element_text(&th)).collect();
                }
            }

            // Body rows are the tr elements with td cells; the header row
            // has only th cells and drops out here
            let rows = table
                .select(&tr_sel)
                .filter_map(|tr| {
                    let cells: Vec<String> =
                        tr.select(&td_sel).map(|td| element_text(&td)).collect();
                    if cells.is_empty() {
                        None
                    } else {
                        Some(cells)
                    }
                })
                .collect();

            TableData {
                table_index,
                headers,
                rows,
            }
        })
        .collect()
}
