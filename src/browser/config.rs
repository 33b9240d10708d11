use std::time::Duration;

/// Configuration for a browser session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Run Chrome in headless mode
    pub headless: bool,

    /// Browser window size
    pub window_size: (u32, u32),

    /// Custom user agent
    pub user_agent: Option<String>,

    /// Default element-wait timeout in seconds
    pub default_timeout_secs: u64,

    /// Additional Chrome flags
    pub chrome_flags: Vec<String>,
}

/// Chrome flags that suppress automation fingerprints and background
/// throttling, carried on every session.
fn base_chrome_flags() -> Vec<String> {
    [
        "--disable-blink-features=AutomationControlled",
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--disable-gpu",
        "--disable-extensions",
        "--disable-default-apps",
        "--no-first-run",
        "--disable-background-timer-throttling",
        "--disable-backgrounding-occluded-windows",
        "--disable-renderer-backgrounding",
        "--disable-features=TranslateUI",
        "--log-level=3",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            user_agent: Some(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36"
                    .to_string(),
            ),
            default_timeout_secs: 10,
            chrome_flags: base_chrome_flags(),
        }
    }
}

impl SessionConfig {
    /// Create a configuration with the given headless flag
    pub fn new(headless: bool) -> Self {
        Self {
            headless,
            ..Self::default()
        }
    }

    /// Create a configuration for debugging (non-headless, visible browser)
    pub fn visible() -> Self {
        Self::new(false)
    }

    /// Get the default wait timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }
}
