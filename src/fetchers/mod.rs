pub mod detail;
pub mod http;
pub mod listing;
pub mod rate_limit;


use crate::error::Result;
use async_trait::async_trait;

/// A page as returned by the listing site
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of raw pages for the fetchers
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch a page.
    ///
    /// Any HTTP status is returned as a page; only transport failures are errors.
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}
