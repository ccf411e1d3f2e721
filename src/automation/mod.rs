//! Browser automation for getting a download started behind a mirror's countdown gate.

pub mod driver;
pub mod machine;
pub mod phase;
pub mod session;
pub mod webdriver;


pub use driver::GateDriver;
pub use machine::Automator;
pub use phase::Phase;
pub use session::{DownloadReport, DownloadSession, DownloadStatus};
pub use webdriver::WebDriverGate;

use crate::config::ScraperConfig;
use crate::error::Error;
use crate::utils::rotate;
use url::Url;

/// Open a browser session and run the download sequence for `url`.
///
/// Never fails outright: connection and input problems come back as a
/// failed report at [`Phase::Navigating`]. Connecting is bounded by that
/// phase's timeout.
pub async fn run_auto_download(config: &ScraperConfig, url: &str, headless: bool) -> DownloadReport {
    if let Err(e) = check_target(url) {
        return failed_before_start(url, headless, e);
    }

    let user_agent = rotate(&config.user_agents).map(String::as_str);
    let waited = config.automation.policy(Phase::Navigating).timeout;
    let connected = tokio::time::timeout(
        waited,
        WebDriverGate::connect(&config.automation, headless, user_agent),
    )
    .await
    .unwrap_or(Err(Error::PhaseTimeout {
        phase: Phase::Navigating,
        waited,
    }));

    match connected {
        Ok(driver) => {
            Automator::new(config.automation.clone())
                .run(driver, url, headless)
                .await
        }
        Err(e) => failed_before_start(url, headless, e),
    }
}

fn check_target(url: &str) -> Result<(), Error> {
    match Url::parse(url.trim()) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(parsed) => Err(Error::InvalidInput(format!(
            "unsupported scheme {:?} in {}",
            parsed.scheme(),
            url
        ))),
        Err(e) => Err(Error::InvalidInput(format!("bad URL {:?}: {}", url, e))),
    }
}

fn failed_before_start(url: &str, headless: bool, error: Error) -> DownloadReport {
    let mut session = DownloadSession::new(url, headless);
    session.fail(error);
    session.into_report()
}
