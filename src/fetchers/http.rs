use crate::config::ScraperConfig;
use crate::error::{Error, Result};
use crate::fetchers::rate_limit::RateLimiter;
use crate::fetchers::{FetchedPage, PageSource};
use crate::utils::{rotate, secs};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use std::time::Instant;

/// Fetches pages over HTTP with browser-like headers and a shared rate limit
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    user_agents: Vec<String>,
    rate_limiter: RateLimiter,
}

impl HttpSource {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .cookie_store(true)
            .gzip(true)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            user_agents: config.user_agents.clone(),
            rate_limiter: RateLimiter::new(config.request_delay()),
        })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        self.rate_limiter.acquire().await;

        let mut request = self.client.get(url);
        if let Some(agent) = rotate(&self.user_agents) {
            request = request.header(USER_AGENT, agent.as_str());
        }

        let start = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| Error::fetch(url, e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| Error::fetch(url, Some(status), e.to_string()))?;

        ::log::debug!(
            "GET {} -> {} ({} bytes in {})",
            url,
            status,
            body.len(),
            secs(start.elapsed())
        );

        Ok(FetchedPage {
            url: final_url,
            status,
            body,
        })
    }
}
