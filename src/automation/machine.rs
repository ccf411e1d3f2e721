use crate::automation::driver::GateDriver;
use crate::automation::session::{DownloadReport, DownloadSession};
use crate::automation::Phase;
use crate::config::AutomationConfig;
use crate::error::{Error, Result};
use crate::parsers::mirrors::PROVIDERS;
use crate::utils::secs;
use std::future::Future;
use tokio::time::Instant;
use url::Url;

/// Download triggers on a game page, in order of preference
pub const TRIGGER_SELECTORS: [&str; 2] = [
    "a.btn-download",
    "a[href*='uploadhaven.com/download/']",
];

/// Controls that start the transfer once a gate's countdown ends
pub const FINAL_CONTROLS: [&str; 4] = [
    "#download-button",
    "button[class*='download']",
    "a[class*='download']",
    "[class*='download'] button",
];

/// Drives a browser from a game page through a mirror's countdown gate
#[derive(Debug, Clone)]
pub struct Automator {
    config: AutomationConfig,
}

impl Automator {
    pub fn new(config: AutomationConfig) -> Self {
        Self { config }
    }

    /// Run the whole sequence on `driver`, which is closed before returning
    pub async fn run<D: GateDriver>(&self, driver: D, url: &str, headless: bool) -> DownloadReport {
        ::log::info!(
            "Starting download of {} ({})",
            url,
            if headless { "headless" } else { "visible" }
        );

        let mut session = DownloadSession::new(url, headless);
        let mut trigger = TRIGGER_SELECTORS[0];

        while !session.phase.is_terminal() {
            let outcome = match session.phase {
                Phase::Navigating => self.navigate(&driver, url).await,
                Phase::LocatingTrigger => self
                    .locate_trigger(&driver, url)
                    .await
                    .map(|found| trigger = found),
                Phase::Clicking => self
                    .follow_trigger(&driver, trigger)
                    .await
                    .map(|gate| session.gate_url = Some(gate)),
                Phase::AwaitingCountdown => self.pass_gate(&driver).await,
                Phase::Completed | Phase::Failed => Ok(()),
            };

            match outcome {
                Ok(()) => session.advance(),
                Err(e) => session.fail(e),
            }
        }

        let report = session.into_report();
        if report.is_completed() {
            ::log::info!("{}", report);
            if !headless && !self.config.linger().is_zero() {
                ::log::info!(
                    "Keeping the browser open for {}",
                    secs(self.config.linger())
                );
                tokio::time::sleep(self.config.linger()).await;
            }
        }

        let close_bound = self.config.policy(Phase::Navigating).timeout;
        match tokio::time::timeout(close_bound, driver.close()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => ::log::warn!("Failed to close browser session: {}", e),
            Err(_) => ::log::warn!(
                "Browser session did not close within {}",
                secs(close_bound)
            ),
        }
        report
    }

    async fn navigate<D: GateDriver>(&self, driver: &D, url: &str) -> Result<()> {
        let deadline = self.deadline(Phase::Navigating);
        self.with_retries(Phase::Navigating, deadline, move |_| driver.goto(url))
            .await
    }

    /// Poll for a trigger until the phase times out; retries reload the page
    async fn locate_trigger<D: GateDriver>(&self, driver: &D, url: &str) -> Result<&'static str> {
        let deadline = self.deadline(Phase::LocatingTrigger);
        self.with_retries(Phase::LocatingTrigger, deadline, move |attempt| async move {
            if attempt > 0 {
                driver.goto(url).await?;
            }
            loop {
                for selector in TRIGGER_SELECTORS {
                    if driver.exists(selector).await? {
                        ::log::debug!("Found download trigger {}", selector);
                        return Ok(selector);
                    }
                }
                tokio::time::sleep(self.config.poll_interval()).await;
            }
        })
        .await
    }

    /// Click the trigger and wait until a mirror provider's page is showing
    async fn follow_trigger<D: GateDriver>(&self, driver: &D, trigger: &str) -> Result<String> {
        let deadline = self.deadline(Phase::Clicking);
        self.with_retries(Phase::Clicking, deadline, move |_| async move {
            let windows = driver.window_count().await?;
            driver.click(trigger).await?;

            let mut focused = false;
            loop {
                if !focused && driver.window_count().await? > windows {
                    driver.focus_newest_window().await?;
                    focused = true;
                }
                let current = driver.current_url().await?;
                if let Some(provider) = provider_of(&current) {
                    ::log::info!("Reached {} gate at {}", provider, current);
                    return Ok(current);
                }
                tokio::time::sleep(self.config.poll_interval()).await;
            }
        })
        .await
    }

    /// Sit out the countdown, press the final control once and confirm it took.
    ///
    /// Only clicks that failed are repeated. Without a way to watch for the
    /// transfer, a successful click completes the run.
    async fn pass_gate<D: GateDriver>(&self, driver: &D) -> Result<()> {
        let phase = Phase::AwaitingCountdown;
        let countdown = self.config.countdown();
        ::log::info!("Waiting {} for the countdown", secs(countdown));
        tokio::time::sleep(countdown).await;

        let deadline = self.deadline(phase);
        let control = self
            .with_retries(phase, deadline, move |_| async move {
                let control = loop {
                    if let Some(found) = enabled_control(driver).await? {
                        break found;
                    }
                    tokio::time::sleep(self.config.poll_interval()).await;
                };
                driver.click(control).await?;
                ::log::debug!("Clicked final control {}", control);
                Ok(control)
            })
            .await?;

        if !driver.observes_transfers() {
            ::log::info!("Download started");
            return Ok(());
        }

        self.within(phase, deadline, async {
            loop {
                if driver.transfer_started().await? || !driver.is_enabled(control).await? {
                    ::log::info!("Download started");
                    return Ok(());
                }
                tokio::time::sleep(self.config.poll_interval()).await;
            }
        })
        .await
    }

    fn deadline(&self, phase: Phase) -> Instant {
        Instant::now() + self.config.policy(phase).timeout
    }

    /// Run `step` until it succeeds, retrying driver errors up to the phase
    /// budget. All attempts share the phase `deadline`.
    async fn with_retries<T, F, Fut>(
        &self,
        phase: Phase,
        deadline: Instant,
        mut step: F,
    ) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let retries = self.config.policy(phase).retries;
        let mut attempt = 0;
        loop {
            match self.within(phase, deadline, step(attempt)).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < retries => {
                    attempt += 1;
                    ::log::info!("Retrying {} ({}/{}): {}", phase, attempt, retries, e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Bound `step` by the phase deadline
    async fn within<T>(
        &self,
        phase: Phase,
        deadline: Instant,
        step: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout_at(deadline, step).await {
            Ok(result) => result,
            Err(_) => Err(Error::PhaseTimeout {
                phase,
                waited: self.config.policy(phase).timeout,
            }),
        }
    }
}

/// First final control that is present and enabled
async fn enabled_control<D: GateDriver>(driver: &D) -> Result<Option<&'static str>> {
    for selector in FINAL_CONTROLS {
        if driver.is_enabled(selector).await? {
            return Ok(Some(selector));
        }
    }
    Ok(None)
}

/// Name of the mirror provider serving `url`, if any
fn provider_of(url: &str) -> Option<&'static str> {
    let url = Url::parse(url).ok()?;
    PROVIDERS.by_host(&url)
}
