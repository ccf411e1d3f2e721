use crate::automation::Phase;
use crate::error::Error;
use crate::utils::secs;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// State of one download run
#[derive(Debug)]
pub struct DownloadSession {
    pub target_url: String,
    pub headless: bool,
    pub phase: Phase,
    /// Mirror gate page, once reached
    pub gate_url: Option<String>,
    pub last_error: Option<Error>,
    failed_at: Option<Phase>,
    started: Instant,
}

impl DownloadSession {
    pub fn new(target_url: &str, headless: bool) -> Self {
        Self {
            target_url: target_url.to_string(),
            headless,
            phase: Phase::Navigating,
            gate_url: None,
            last_error: None,
            failed_at: None,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Move to the phase after the current one
    pub fn advance(&mut self) {
        let next = self.phase.next();
        ::log::debug!(
            "{}: {} -> {} after {}",
            self.target_url,
            self.phase,
            next,
            secs(self.elapsed())
        );
        self.phase = next;
    }

    /// End the run with `error`, remembering the step that failed
    pub fn fail(&mut self, error: Error) {
        ::log::warn!(
            "{}: download failed while {}: {}",
            self.target_url,
            self.phase,
            error
        );
        self.failed_at = Some(self.phase);
        self.phase = Phase::Failed;
        self.last_error = Some(error);
    }

    pub fn into_report(self) -> DownloadReport {
        let elapsed = self.elapsed();
        let status = if self.last_error.is_none() && self.phase == Phase::Completed {
            DownloadStatus::Completed
        } else {
            DownloadStatus::Failed
        };
        DownloadReport {
            status,
            url: self.target_url,
            gate_url: self.gate_url,
            phase: self.failed_at.unwrap_or(self.phase),
            elapsed,
            error: self.last_error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DownloadStatus {
    Completed,
    Failed,
}

/// Outcome of a download run
#[derive(Debug, Serialize)]
pub struct DownloadReport {
    pub status: DownloadStatus,
    pub url: String,
    pub gate_url: Option<String>,
    /// Last phase reached; for failures, the phase that failed
    pub phase: Phase,
    pub elapsed: Duration,
    #[serde(serialize_with = "error_message")]
    pub error: Option<Error>,
}

impl DownloadReport {
    pub fn is_completed(&self) -> bool {
        self.status == DownloadStatus::Completed
    }
}

fn error_message<S: Serializer>(error: &Option<Error>, serializer: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(error) => serializer.serialize_some(&error.to_string()),
        None => serializer.serialize_none(),
    }
}

impl fmt::Display for DownloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.status, &self.error) {
            (DownloadStatus::Completed, _) => write!(
                f,
                "download of {} completed in {}",
                self.url,
                secs(self.elapsed)
            ),
            (DownloadStatus::Failed, Some(error)) => write!(
                f,
                "download of {} failed while {} after {}: {}",
                self.url,
                self.phase,
                secs(self.elapsed),
                error
            ),
            (DownloadStatus::Failed, None) => write!(
                f,
                "download of {} stopped while {} after {}",
                self.url,
                self.phase,
                secs(self.elapsed)
            ),
        }
    }
}
