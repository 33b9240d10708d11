use super::config::SessionConfig;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Polling interval for bounded element waits
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Pause after a scroll to let lazy-loaded content arrive
const SCROLL_PAUSE: Duration = Duration::from_secs(2);

/// Script run on tab creation to hide the usual automation indicators
const STEALTH_SCRIPT: &str = r#"
    Object.defineProperty(navigator, 'webdriver', {
        get: () => undefined
    });
    Object.defineProperty(navigator, 'plugins', {
        get: () => [1, 2, 3, 4, 5]
    });
    Object.defineProperty(navigator, 'languages', {
        get: () => ['en-US', 'en']
    });
"#;

/// Errors that can occur during browser operations
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Browser initialization failed: {0}")]
    InitializationError(String),

    #[error("Browser configuration error: {0}")]
    ConfigurationError(String),

    #[error("Navigation error: {0}")]
    NavigationError(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("JavaScript execution error: {0}")]
    JavaScriptError(String),

    #[error("HTML extraction error: {0}")]
    HtmlExtractionError(String),

    #[error("Session is closed")]
    SessionClosed,
}

/// The live half of a session: the Chrome process and its single tab.
/// Dropping this kills the process.
struct Live {
    _browser: Browser,
    tab: Arc<Tab>,
}

/// One browser-automation session: a single Chrome process and one tab,
/// used sequentially by a single caller.
///
/// Lifecycle is linear: active from construction until [`Session::close`]
/// (or drop), never active again afterwards. Every operation on a closed
/// session fails fast with [`BrowserError::SessionClosed`].
pub struct Session {
    live: Option<Live>,
    default_timeout: Duration,
}

impl Session {
    /// Start a Chrome process and open the session tab.
    ///
    /// Startup failures propagate; there is no retry.
    pub fn new(config: SessionConfig) -> Result<Self, BrowserError> {
        use std::ffi::OsStr;

        // Owned strings first, then borrow for the launch options
        let user_agent_arg = config
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={}", ua));

        let mut args: Vec<&OsStr> = config
            .chrome_flags
            .iter()
            .map(|f| OsStr::new(f.as_str()))
            .collect();

        if let Some(ref ua) = user_agent_arg {
            args.push(OsStr::new(ua));
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some(config.window_size))
            .args(args)
            .build()
            .map_err(|e| BrowserError::ConfigurationError(e.to_string()))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| BrowserError::InitializationError(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| BrowserError::InitializationError(e.to_string()))?;

        tab.evaluate(STEALTH_SCRIPT, false)
            .map_err(|e| BrowserError::JavaScriptError(e.to_string()))?;

        log::info!("Browser session started (headless: {})", config.headless);

        Ok(Self {
            live: Some(Live {
                _browser: browser,
                tab,
            }),
            default_timeout: config.timeout(),
        })
    }

    fn tab(&self) -> Result<&Arc<Tab>, BrowserError> {
        self.live
            .as_ref()
            .map(|l| &l.tab)
            .ok_or(BrowserError::SessionClosed)
    }

    /// Navigate to a URL, wait for the navigation to settle, then wait for
    /// the document body to be present (up to the session default timeout).
    pub fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        let tab = self.tab()?;

        tab.navigate_to(url).map_err(|e| {
            BrowserError::NavigationError(format!("Failed to navigate to {}: {}", url, e))
        })?;

        tab.wait_until_navigated().map_err(|e| {
            BrowserError::NavigationError(format!("Navigation timeout for {}: {}", url, e))
        })?;

        // The root element is required; without it the page is unusable
        self.wait_for_selector_with_timeout("body", self.default_timeout)
    }

    /// Wait for an element matching the given CSS selector, using the
    /// session default timeout
    pub fn wait_for_selector(&self, selector: &str) -> Result<(), BrowserError> {
        self.wait_for_selector_with_timeout(selector, self.default_timeout)
    }

    /// Wait for an element matching the given CSS selector, polling at a
    /// fixed interval until it appears or the timeout elapses
    pub fn wait_for_selector_with_timeout(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let script = format!(
            r#"document.querySelector('{}') !== null"#,
            escape_selector(selector)
        );
        self.poll_until(&script, timeout)
            .map_err(|e| match e {
                BrowserError::SessionClosed => BrowserError::SessionClosed,
                _ => BrowserError::Timeout(format!("Waiting for selector: {}", selector)),
            })
    }

    /// Wait until an element is present, visible and not disabled
    pub fn wait_for_clickable(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector('{}');
                return el !== null && !el.disabled && el.offsetParent !== null;
            }})()"#,
            escape_selector(selector)
        );
        self.poll_until(&script, timeout)
            .map_err(|e| match e {
                BrowserError::SessionClosed => BrowserError::SessionClosed,
                _ => BrowserError::Timeout(format!("Waiting for clickable: {}", selector)),
            })
    }

    /// Re-evaluate a boolean script every poll interval until it returns
    /// true or the timeout elapses
    fn poll_until(&self, script: &str, timeout: Duration) -> Result<(), BrowserError> {
        let start = Instant::now();

        loop {
            if start.elapsed() > timeout {
                return Err(BrowserError::Timeout(script.to_string()));
            }

            let tab = self.tab()?;
            if let Ok(result) = tab.evaluate(script, false) {
                if result.value.and_then(|v| v.as_bool()) == Some(true) {
                    return Ok(());
                }
            }

            std::thread::sleep(POLL_INTERVAL);
        }
    }

    /// Check whether an element matching the selector is currently present,
    /// without waiting
    pub fn element_exists(&self, selector: &str) -> Result<bool, BrowserError> {
        let script = format!(
            r#"document.querySelector('{}') !== null"#,
            escape_selector(selector)
        );

        let result = self
            .tab()?
            .evaluate(&script, false)
            .map_err(|e| BrowserError::JavaScriptError(e.to_string()))?;

        Ok(result.value.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    /// Click the first element matching the given selector
    pub fn click(&self, selector: &str) -> Result<(), BrowserError> {
        let script = format!(
            r#"document.querySelector('{}').click();"#,
            escape_selector(selector)
        );

        self.tab()?
            .evaluate(&script, false)
            .map_err(|e| BrowserError::JavaScriptError(format!("Click failed: {}", e)))?;

        Ok(())
    }

    /// Clear the value of an input element
    pub fn clear_field(&self, selector: &str) -> Result<(), BrowserError> {
        let script = format!(
            r#"document.querySelector('{}').value = '';"#,
            escape_selector(selector)
        );

        self.tab()?
            .evaluate(&script, false)
            .map_err(|e| BrowserError::JavaScriptError(format!("Clear failed: {}", e)))?;

        Ok(())
    }

    /// Focus an input element and type text into it
    pub fn type_into(&self, selector: &str, text: &str) -> Result<(), BrowserError> {
        let script = format!(
            r#"document.querySelector('{}').focus();"#,
            escape_selector(selector)
        );

        let tab = self.tab()?;
        tab.evaluate(&script, false)
            .map_err(|e| BrowserError::JavaScriptError(format!("Focus failed: {}", e)))?;

        tab.type_str(text)
            .map_err(|e| BrowserError::JavaScriptError(format!("Typing failed: {}", e)))?;

        Ok(())
    }

    /// Scroll to the bottom of the page and pause for lazy-loaded content
    pub fn scroll_to_bottom(&self) -> Result<(), BrowserError> {
        self.tab()?
            .evaluate("window.scrollTo(0, document.body.scrollHeight);", false)
            .map_err(|e| BrowserError::JavaScriptError(format!("Scroll failed: {}", e)))?;

        std::thread::sleep(SCROLL_PAUSE);

        Ok(())
    }

    /// Measure the current page height
    pub fn page_height(&self) -> Result<f64, BrowserError> {
        let result = self
            .tab()?
            .evaluate("document.body.scrollHeight", false)
            .map_err(|e| BrowserError::JavaScriptError(e.to_string()))?;

        result
            .value
            .and_then(|v| v.as_f64())
            .ok_or_else(|| BrowserError::JavaScriptError("scrollHeight returned no number".into()))
    }

    /// Get the rendered HTML content of the page
    pub fn html(&self) -> Result<String, BrowserError> {
        self.tab()?
            .get_content()
            .map_err(|e| BrowserError::HtmlExtractionError(e.to_string()))
    }

    /// Get the page title
    pub fn title(&self) -> Result<String, BrowserError> {
        self.tab()?
            .get_title()
            .map_err(|e| BrowserError::JavaScriptError(e.to_string()))
    }

    /// Get the current URL after redirects
    pub fn current_url(&self) -> Result<String, BrowserError> {
        Ok(self.tab()?.get_url())
    }

    /// Close the session, terminating the Chrome process.
    ///
    /// Idempotent; any operation invoked afterwards fails fast with
    /// [`BrowserError::SessionClosed`].
    pub fn close(&mut self) {
        if self.live.take().is_some() {
            log::info!("Browser session closed");
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

/// Escape a CSS selector for embedding in a single-quoted JS string
fn escape_selector(selector: &str) -> String {
    selector.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_selector() {
        assert_eq!(escape_selector("div.item"), "div.item");
        assert_eq!(escape_selector("a[rel='next']"), "a[rel=\\'next\\']");
    }

    #[test]
    fn test_closed_session_fails_fast() {
        // A session that was never opened behaves like a closed one
        let mut session = Session {
            live: None,
            default_timeout: Duration::from_secs(1),
        };

        assert!(matches!(
            session.navigate("https://example.com"),
            Err(BrowserError::SessionClosed)
        ));
        assert!(matches!(session.html(), Err(BrowserError::SessionClosed)));
        assert!(matches!(
            session.page_height(),
            Err(BrowserError::SessionClosed)
        ));
        // Waits must not mask the closed state as a timeout, or poll at all
        assert!(matches!(
            session.wait_for_selector("body"),
            Err(BrowserError::SessionClosed)
        ));

        // close() on a closed session is a no-op
        session.close();
        session.close();
    }

    #[test]
    #[ignore] // Requires Chrome to be installed
    fn test_basic_navigation() {
        let session = Session::new(SessionConfig::default()).unwrap();
        assert!(session.navigate("https://example.com").is_ok());

        let html = session.html().unwrap();
        assert!(html.contains("Example"));
    }

    #[test]
    #[ignore] // Requires Chrome to be installed
    fn test_wait_for_selector() {
        let session = Session::new(SessionConfig::default()).unwrap();
        session.navigate("https://example.com").unwrap();
        assert!(session.wait_for_selector("h1").is_ok());
        assert!(session
            .wait_for_selector_with_timeout("#no-such-element", Duration::from_secs(1))
            .is_err());
    }
}
