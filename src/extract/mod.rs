//! Extraction operations
//!
//! Each operation navigates the session to a page, waits for it to be
//! usable, and shapes the rendered DOM into one of the record types in
//! [`crate::models`]. Operations are independent: each performs its own
//! navigation and none consumes another's output.
//!
//! Faults never propagate past an operation boundary. Anything that goes
//! wrong inside an operation is logged and replaced with an empty result;
//! only session construction can fail the program.

pub mod dynamic;
pub mod interact;
pub mod page;
pub mod quotes;
pub mod tables;

use scraper::ElementRef;

/// Collapse an element's text nodes into one trimmed string
pub(crate) fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
