//! Browser automation module
//!
//! Wraps a single headless Chrome process behind a [`Session`] that exposes
//! navigation, bounded element waits, and the interaction primitives the
//! extraction operations need. The process is released when the session is
//! dropped, so teardown runs on every exit path.
//!
//! # Example
//!
//! ```no_run
//! use rust_web_scraper::browser::{Session, SessionConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::new(SessionConfig::default())?;
//!
//! session.navigate("https://example.com")?;
//! session.wait_for_selector("h1")?;
//! let html = session.html()?;
//!
//! println!("Extracted {} bytes of HTML", html.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod session;

// Re-export main types for convenience
pub use config::SessionConfig;
pub use session::{BrowserError, Session};
