use rust_web_scraper::browser::{Session, SessionConfig};
use rust_web_scraper::{extract, sink};

/// Fixed demonstration sequence: four extractions against known pages,
/// up to four output files. Session construction failures propagate and
/// end the program; everything after that degrades to empty results.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    log4rs::init_file("log4rs.yml", Default::default())?;

    log::info!("Starting web scraper...");
    let mut session = Session::new(SessionConfig::default())?;

    log::info!("=== Demo 1: quotes ===");
    let quotes = extract::quotes::scrape(&session);
    if let Some(first) = quotes.first() {
        log::info!("Sample quote: {} - {}", first.text, first.author);
    }
    if !quotes.is_empty() {
        sink::save_to_json(&quotes, "quotes_data.json");
    }

    log::info!("=== Demo 2: basic element scraping ===");
    let basic = extract::page::scrape(&session, "https://httpbin.org/html");
    if !basic.url.is_empty() {
        sink::save_to_json(&basic, "basic_data.json");
    }

    log::info!("=== Demo 3: table scraping ===");
    let tables = extract::tables::scrape(&session, "https://www.w3schools.com/html/html_tables.asp");
    if !tables.is_empty() {
        sink::save_to_json(&tables, "table_data.json");
    }

    log::info!("=== Demo 4: builtwith ===");
    let builtwith = extract::page::scrape(&session, "https://builtwith.com/");
    if !builtwith.url.is_empty() {
        sink::save_to_json(&builtwith, "builtwith_data.json");
    }

    session.close();
    log::info!("All scraping completed");
    Ok(())
}
