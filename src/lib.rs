//! Library interface for rust_web_scraper
//!
//! Drives a single headless Chrome session through a handful of
//! independent extraction operations and persists the results as JSON or
//! CSV. Everything is sequential and blocking; the only shared resource
//! is the browser session, owned by one caller at a time.
//!
//! ```no_run
//! use rust_web_scraper::browser::{Session, SessionConfig};
//! use rust_web_scraper::{extract, sink};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::new(SessionConfig::default())?;
//!
//! let page = extract::page::scrape(&session, "https://example.com");
//! sink::save_to_json(&page, "page.json");
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod extract;
pub mod models;
pub mod sink;

// Re-export main types for convenience
pub use browser::{BrowserError, Session, SessionConfig};
pub use models::{
    DynamicItem, ItemAttributes, Link, PageData, Quote, ResultItem, StepOutcome, TableData,
};
