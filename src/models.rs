use serde::{Deserialize, Serialize};

/// A hyperlink with non-empty text and a resolved target
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Link {
    pub text: String,
    pub href: String,
}

/// Result of the generic page extraction: headings, links and paragraphs
/// in document order, whitespace-trimmed, empty entries dropped
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct PageData {
    pub title: String,
    pub url: String,
    pub headings: Vec<String>,
    pub links: Vec<Link>,
    pub paragraphs: Vec<String>,
}

/// One quote block from the quotes demo site
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Quote {
    pub text: String,
    pub author: String,
    pub tags: Vec<String>,
}

/// One result item collected after the interactive steps
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResultItem {
    pub text: String,
    pub link: Option<String>,
}

/// One HTML table: header cells plus body rows. Rows are not validated
/// against the header count; ragged tables come through as-is.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TableData {
    pub table_index: usize,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Attributes captured for a dynamically loaded item
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ItemAttributes {
    pub id: Option<String>,
    pub class: Option<String>,
    #[serde(rename = "data-value")]
    pub data_value: Option<String>,
}

/// One item collected by the dynamic-content extraction
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DynamicItem {
    pub text: String,
    pub attributes: ItemAttributes,
}

/// Outcome of a best-effort interaction step. Absence of the target is
/// normal and distinct from an actual failure; neither aborts the
/// remaining steps.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The target was found and the step ran
    Applied,
    /// The target was not present on the page
    NotFound,
    /// The step ran into an error
    Failed(String),
}

impl StepOutcome {
    /// Log the outcome of a named step at the appropriate level
    pub fn log(&self, step: &str) {
        match self {
            StepOutcome::Applied => log::info!("{}: done", step),
            StepOutcome::NotFound => log::info!("{}: not present, skipped", step),
            StepOutcome::Failed(e) => log::warn!("{}: failed: {}", step, e),
        }
    }
}
