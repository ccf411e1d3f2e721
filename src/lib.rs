//! Scraper for the SteamUnlocked game catalogue: listings, game details and
//! browser-driven downloads through mirror countdown gates.

pub mod automation;
pub mod category;
pub mod config;
pub mod error;
pub mod fetchers;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use automation::{DownloadReport, DownloadStatus, Phase};
pub use category::{Category, CategoryInfo};
pub use config::{AutomationConfig, ScraperConfig};
pub use error::{Error, Result};
pub use fetchers::http::HttpSource;
pub use fetchers::{FetchedPage, PageSource};
pub use results::{
    AzPage, CategoryPage, GameDetail, ListingPage, MirrorLink, RequirementSet, SearchResult,
    SystemRequirements,
};

use fetchers::detail::DetailExtractor;
use fetchers::listing::ListingFetcher;
use std::sync::Arc;
use tokio::task::JoinHandle;
use url::Url;

/// Entry point for every scraper operation.
///
/// Listing and detail calls share one page source, and with it one rate
/// limiter, so a single `Scraper` can be used from many tasks at once.
pub struct Scraper<S: PageSource = HttpSource> {
    config: ScraperConfig,
    base: Url,
    listings: ListingFetcher<S>,
    details: DetailExtractor<S>,
}

impl Scraper<HttpSource> {
    /// Create a scraper that talks to the site over HTTP.
    ///
    /// `WEBDRIVER_URL` in the environment overrides the configured endpoint.
    pub fn new(mut config: ScraperConfig) -> Result<Self> {
        config.apply_env();
        config.validate()?;
        let source = Arc::new(HttpSource::new(&config)?);
        Self::with_source(config, source)
    }
}

impl<S: PageSource> Scraper<S> {
    /// Create a scraper over any page source
    pub fn with_source(config: ScraperConfig, source: Arc<S>) -> Result<Self> {
        let base = config.base()?;
        Ok(Self {
            listings: ListingFetcher::new(
                Arc::clone(&source),
                base.clone(),
                config.default_search_limit,
            ),
            details: DetailExtractor::new(source, base.clone()),
            base,
            config,
        })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Search games by title
    pub async fn search(&self, query: &str, limit: Option<usize>) -> Result<Vec<SearchResult>> {
        self.listings.search(query, limit).await
    }

    /// Full details of one game, by slug or page URL
    pub async fn get_detail(&self, slug_or_url: &str) -> Result<GameDetail> {
        self.details.get_detail(slug_or_url).await
    }

    pub async fn list_category(&self, category: &str, page: u32) -> Result<CategoryPage> {
        self.listings.list_category(category, page).await
    }

    pub async fn list_az(&self, letter: Option<&str>, page: u32) -> Result<AzPage> {
        self.listings.list_az(letter, page).await
    }

    /// Every category the site lists games under
    pub fn categories(&self) -> Vec<CategoryInfo> {
        Category::ALL
            .iter()
            .map(|category| category.info(&self.base))
            .collect()
    }

    /// Drive a browser through the download of `url` and wait for the outcome
    pub async fn run_auto_download(&self, url: &str, headless: bool) -> DownloadReport {
        automation::run_auto_download(&self.config, url, headless).await
    }

    /// Start a download run in the background
    pub fn spawn_auto_download(&self, url: &str, headless: bool) -> JoinHandle<DownloadReport> {
        let config = self.config.clone();
        let url = url.to_string();
        tokio::spawn(async move { automation::run_auto_download(&config, &url, headless).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Offline;

    #[async_trait]
    impl PageSource for Offline {
        async fn fetch(&self, url: &str) -> Result<FetchedPage> {
            Err(Error::fetch(url, None, "offline"))
        }
    }

    fn scraper() -> Scraper<Offline> {
        Scraper::with_source(ScraperConfig::default(), Arc::new(Offline)).unwrap()
    }

    #[test]
    fn test_categories() {
        let categories = scraper().categories();
        assert_eq!(categories.len(), Category::ALL.len());

        let open_world = categories.iter().find(|c| c.slug == "open-world").unwrap();
        assert_eq!(open_world.name, "OPEN WORLD");
        assert_eq!(
            open_world.url,
            "https://steamunlocked.org/category/open-world/"
        );
    }

    #[tokio::test]
    async fn test_errors_propagate_through_facade() {
        let scraper = scraper();
        let err = scraper.search("diablo", None).await.unwrap_err();
        assert_eq!(err.http_status(), 502);

        let err = scraper.list_category("nope", 1).await.unwrap_err();
        assert_eq!(err.http_status(), 400);
    }

    #[tokio::test]
    async fn test_spawned_download_rejects_bad_url() {
        let handle = scraper().spawn_auto_download("not a url", true);
        let report = handle.await.unwrap();
        assert_eq!(report.status, DownloadStatus::Failed);
        assert_eq!(report.phase, Phase::Navigating);
        assert!(matches!(report.error, Some(Error::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let config = ScraperConfig {
            base_url: "not a url".into(),
            ..ScraperConfig::default()
        };
        let err = Scraper::with_source(config, Arc::new(Offline)).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }
}
