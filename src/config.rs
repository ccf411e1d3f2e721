use crate::automation::Phase;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Configuration for the listing fetcher and detail extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Root URL of the listing site
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Minimum delay between outbound requests, in seconds
    #[serde(default = "default_request_delay_secs")]
    pub request_delay_secs: f64,

    /// Per-request timeout, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Number of search results returned when the caller gives no limit
    #[serde(default = "default_search_limit")]
    pub default_search_limit: usize,

    /// User agents rotated across requests
    #[serde(default = "default_user_agents")]
    pub user_agents: Vec<String>,

    /// Browser automation settings
    #[serde(default)]
    pub automation: AutomationConfig,
}

/// Configuration for the download automator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Run the browser without a window unless the caller says otherwise
    #[serde(default)]
    pub headless: bool,

    /// Time bound applied to each phase, in milliseconds
    #[serde(default = "default_phase_timeout_ms")]
    pub phase_timeout_ms: u64,

    /// Phase specific time bounds that replace `phase_timeout_ms`
    #[serde(default)]
    pub phase_timeouts: BTreeMap<Phase, u64>,

    /// Countdown imposed by the mirror host, in milliseconds
    #[serde(default = "default_countdown_ms")]
    pub countdown_ms: u64,

    /// Pause between polls for a control, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Local retries per phase before the run fails
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Directory the browser saves files into; watched to confirm a transfer started
    #[serde(default)]
    pub download_dir: Option<PathBuf>,

    /// How long a visible browser stays open after a completed run, in milliseconds
    #[serde(default = "default_linger_ms")]
    pub linger_ms: u64,
}

/// Timeout and retry budget for a single automation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhasePolicy {
    pub timeout: Duration,
    pub retries: u32,
}

fn default_base_url() -> String {
    "https://steamunlocked.org".to_string()
}

fn default_request_delay_secs() -> f64 {
    1.0
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_search_limit() -> usize {
    20
}

fn default_user_agents() -> Vec<String> {
    [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    ]
    .iter()
    .map(|ua| ua.to_string())
    .collect()
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_phase_timeout_ms() -> u64 {
    15_000
}

fn default_countdown_ms() -> u64 {
    16_000
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_max_retries() -> u32 {
    2
}

fn default_linger_ms() -> u64 {
    30_000
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_delay_secs: default_request_delay_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            default_search_limit: default_search_limit(),
            user_agents: default_user_agents(),
            automation: AutomationConfig::default(),
        }
    }
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            headless: false,
            phase_timeout_ms: default_phase_timeout_ms(),
            phase_timeouts: BTreeMap::new(),
            countdown_ms: default_countdown_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            max_retries: default_max_retries(),
            download_dir: None,
            linger_ms: default_linger_ms(),
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Override settings from the environment
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.automation.webdriver_url = webdriver_url;
            }
        }
    }

    /// Check values that serde alone cannot constrain
    pub fn validate(&self) -> Result<()> {
        self.base()?;
        if !self.request_delay_secs.is_finite() || self.request_delay_secs < 0.0 {
            return Err(Error::Config(format!(
                "request_delay_secs must be a non-negative number, got {}",
                self.request_delay_secs
            )));
        }
        if self.default_search_limit == 0 {
            return Err(Error::Config("default_search_limit must be at least 1".into()));
        }
        if self.user_agents.is_empty() {
            return Err(Error::Config("user_agents must not be empty".into()));
        }
        if self.automation.phase_timeout_ms == 0 {
            return Err(Error::Config("phase_timeout_ms must be positive".into()));
        }
        Ok(())
    }

    /// Parsed base URL of the listing site
    pub fn base(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("base_url {:?}: {}", self.base_url, e)))
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_secs_f64(self.request_delay_secs.max(0.0))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl AutomationConfig {
    /// Time bound and retry budget for the given phase
    pub fn policy(&self, phase: Phase) -> PhasePolicy {
        let timeout_ms = self
            .phase_timeouts
            .get(&phase)
            .copied()
            .unwrap_or(self.phase_timeout_ms);
        PhasePolicy {
            timeout: Duration::from_millis(timeout_ms),
            retries: self.max_retries,
        }
    }

    pub fn countdown(&self) -> Duration {
        Duration::from_millis(self.countdown_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn linger(&self) -> Duration {
        Duration::from_millis(self.linger_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site_behaviour() {
        let config = ScraperConfig::default();
        assert_eq!(config.base_url, "https://steamunlocked.org");
        assert_eq!(config.request_delay(), Duration::from_secs(1));
        assert_eq!(config.automation.countdown(), Duration::from_secs(16));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ScraperConfig = serde_json::from_str(
            r#"{
                "request_delay_secs": 0.25,
                "automation": {
                    "headless": true,
                    "phase_timeouts": { "LocatingTrigger": 5000 }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.request_delay(), Duration::from_millis(250));
        assert!(config.automation.headless);
        assert_eq!(config.automation.webdriver_url, "http://localhost:4444");
        assert_eq!(
            config.automation.policy(Phase::LocatingTrigger).timeout,
            Duration::from_millis(5000)
        );
        assert_eq!(
            config.automation.policy(Phase::Navigating).timeout,
            Duration::from_millis(15_000)
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ScraperConfig::default();
        config.base_url = "not a url".into();
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = ScraperConfig::default();
        config.request_delay_secs = -1.0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = ScraperConfig::default();
        config.automation.phase_timeout_ms = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
