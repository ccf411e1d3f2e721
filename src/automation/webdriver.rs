use crate::automation::driver::GateDriver;
use crate::config::AutomationConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Endpoints tried when the configured one refuses the connection
const FALLBACK_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4444", // geckodriver / Selenium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

const WINDOW_SIZE: &str = "--window-size=1366,900";

/// A WebDriver browser session driven through fantoccini
pub struct WebDriverGate {
    client: Client,
    download_dir: Option<PathBuf>,
    started: SystemTime,
}

impl WebDriverGate {
    /// Open a browser session, falling back to well-known local endpoints
    pub async fn connect(
        config: &AutomationConfig,
        headless: bool,
        user_agent: Option<&str>,
    ) -> Result<Self> {
        let capabilities = capabilities(config, headless, user_agent);
        let client = connect_to_webdriver(&config.webdriver_url, capabilities).await?;
        Ok(Self {
            client,
            download_dir: config.download_dir.clone(),
            started: SystemTime::now(),
        })
    }

    async fn first(&self, selector: &str) -> Result<Option<fantoccini::elements::Element>> {
        let mut elements = self
            .client
            .find_all(Locator::Css(selector))
            .await
            .map_err(|e| command_error("find", selector, e))?;
        if elements.is_empty() {
            Ok(None)
        } else {
            Ok(Some(elements.swap_remove(0)))
        }
    }
}

/// Chrome capabilities for a run; Firefox drivers ignore the vendor block
fn capabilities(
    config: &AutomationConfig,
    headless: bool,
    user_agent: Option<&str>,
) -> Map<String, Value> {
    let mut args = vec![
        "--disable-blink-features=AutomationControlled".to_string(),
        "--no-sandbox".to_string(),
        WINDOW_SIZE.to_string(),
    ];
    if headless {
        args.push("--headless=new".to_string());
    }
    if let Some(agent) = user_agent {
        args.push(format!("--user-agent={}", agent));
    }

    let mut options = json!({ "args": args });
    if let Some(dir) = &config.download_dir {
        options["prefs"] = json!({
            "download.default_directory": dir.to_string_lossy(),
            "download.prompt_for_download": false,
        });
    }

    let mut caps = Map::new();
    caps.insert("goog:chromeOptions".to_string(), options);
    caps
}

async fn connect_to_webdriver(webdriver_url: &str, caps: Map<String, Value>) -> Result<Client> {
    match ClientBuilder::native()
        .capabilities(caps.clone())
        .connect(webdriver_url)
        .await
    {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
        }
    }

    for url in FALLBACK_URLS.iter() {
        if *url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native()
            .capabilities(caps.clone())
            .connect(url)
            .await
        {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(Error::Automation(format!(
        "no WebDriver server reachable at {} or the fallback endpoints",
        webdriver_url
    )))
}

/// Whether any entry of `dir` was modified at or after `since`.
///
/// Entries that vanish mid-scan are skipped; browsers rename partial
/// downloads once they finish.
async fn file_written_since(dir: &Path, since: SystemTime) -> bool {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            ::log::debug!("Cannot watch download directory {}: {}", dir.display(), e);
            return false;
        }
    };

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => return false,
            Err(e) => {
                ::log::debug!("Stopped scanning {}: {}", dir.display(), e);
                return false;
            }
        };
        let Ok(modified) = entry.metadata().await.and_then(|meta| meta.modified()) else {
            continue;
        };
        if modified >= since {
            ::log::debug!("Transfer observed: {}", entry.path().display());
            return true;
        }
    }
}

fn command_error(action: &str, target: &str, err: CmdError) -> Error {
    Error::Automation(format!("{} {:?}: {}", action, target, err))
}

#[async_trait]
impl GateDriver for WebDriverGate {
    async fn goto(&self, url: &str) -> Result<()> {
        self.client
            .goto(url)
            .await
            .map_err(|e| command_error("goto", url, e))
    }

    async fn current_url(&self) -> Result<String> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(|e| command_error("read", "current URL", e))
    }

    async fn exists(&self, selector: &str) -> Result<bool> {
        Ok(self.first(selector).await?.is_some())
    }

    async fn is_enabled(&self, selector: &str) -> Result<bool> {
        match self.first(selector).await? {
            Some(element) => element
                .is_enabled()
                .await
                .map_err(|e| command_error("inspect", selector, e)),
            None => Ok(false),
        }
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let element = self.first(selector).await?.ok_or_else(|| {
            Error::Automation(format!("nothing to click for {:?}", selector))
        })?;
        element
            .click()
            .await
            .map_err(|e| command_error("click", selector, e))
    }

    async fn window_count(&self) -> Result<usize> {
        self.client
            .windows()
            .await
            .map(|windows| windows.len())
            .map_err(|e| command_error("list", "windows", e))
    }

    async fn focus_newest_window(&self) -> Result<()> {
        let current = self
            .client
            .window()
            .await
            .map_err(|e| command_error("read", "current window", e))?;
        let windows = self
            .client
            .windows()
            .await
            .map_err(|e| command_error("list", "windows", e))?;

        if let Some(newest) = windows.into_iter().rev().find(|w| *w != current) {
            self.client
                .switch_to_window(newest)
                .await
                .map_err(|e| command_error("switch", "window", e))?;
        }
        Ok(())
    }

    fn observes_transfers(&self) -> bool {
        self.download_dir.is_some()
    }

    async fn transfer_started(&self) -> Result<bool> {
        match &self.download_dir {
            Some(dir) => Ok(file_written_since(dir, self.started).await),
            None => Ok(false),
        }
    }

    async fn close(self) -> Result<()> {
        self.client
            .close()
            .await
            .map_err(|e| command_error("close", "session", e))
    }
}
