use crate::automation::Phase;
use std::time::Duration;
use thiserror::Error;

/// Errors produced by the listing fetcher, detail extractor and download automator
#[derive(Debug, Error)]
pub enum Error {
    /// The target site could not be reached or answered with a non-success status
    #[error("failed to fetch {url}: {reason}")]
    Fetch {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    /// The requested game page does not exist
    #[error("no page found at {url}")]
    NotFound { url: String },

    /// The page was fetched but does not have the expected structure
    #[error("unexpected page structure at {url}: {reason}")]
    Parse { url: String, reason: String },

    /// Caller input was rejected before any request was made
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Browser or WebDriver level failure
    #[error("browser automation failed: {0}")]
    Automation(String),

    /// An automation phase ran past its time bound
    #[error("{phase} did not finish within {waited:?}")]
    PhaseTimeout { phase: Phase, waited: Duration },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn fetch(url: &str, status: Option<u16>, reason: impl Into<String>) -> Self {
        Error::Fetch {
            url: url.to_string(),
            status,
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(url: &str, reason: impl Into<String>) -> Self {
        Error::Parse {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    /// The closest HTTP status an API layer should answer with for this error
    pub fn http_status(&self) -> u16 {
        match self {
            Error::InvalidInput(_) => 400,
            Error::NotFound { .. } => 404,
            Error::PhaseTimeout { .. } => 504,
            Error::Fetch { .. } | Error::Parse { .. } | Error::Automation(_) => 502,
            Error::Config(_) | Error::Io(_) | Error::Json(_) => 500,
        }
    }

    /// Whether an automation phase may retry after this error.
    ///
    /// A phase timeout means the phase budget is spent, so it never retries.
    pub(crate) fn is_transient(&self) -> bool {
        matches!(self, Error::Automation(_))
    }
}
