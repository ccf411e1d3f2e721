use crate::error::{Error, Result};
use crate::fetchers::PageSource;
use crate::parsers::detail;
use crate::results::GameDetail;
use crate::utils::slug_from_url;
use std::sync::Arc;
use url::Url;

/// Fetches a single game page and extracts its details
pub struct DetailExtractor<S: ?Sized> {
    source: Arc<S>,
    base: Url,
}

impl<S: PageSource + ?Sized> DetailExtractor<S> {
    pub fn new(source: Arc<S>, base: Url) -> Self {
        Self { source, base }
    }

    /// Accepts a slug or a full game URL
    pub async fn get_detail(&self, slug_or_url: &str) -> Result<GameDetail> {
        let (slug, url) = self.canonical(slug_or_url)?;

        ::log::info!("Fetching game page {}", url);
        let fetched = self.source.fetch(url.as_str()).await?;
        if fetched.status == 404 {
            return Err(Error::NotFound {
                url: url.to_string(),
            });
        }
        if !fetched.is_success() {
            return Err(Error::fetch(
                url.as_str(),
                Some(fetched.status),
                format!("HTTP {}", fetched.status),
            ));
        }

        detail::parse(&fetched.body, &slug, &url, &self.base)
    }

    /// Slug and canonical `{base}/{slug}/` URL for a caller's input
    pub fn canonical(&self, slug_or_url: &str) -> Result<(String, Url)> {
        let input = slug_or_url.trim();
        if input.is_empty() {
            return Err(Error::InvalidInput("game slug must not be empty".into()));
        }

        let slug = if input.starts_with("http://") || input.starts_with("https://") {
            let url = Url::parse(input)
                .map_err(|e| Error::InvalidInput(format!("bad game URL {:?}: {}", input, e)))?;
            slug_from_url(&url).ok_or_else(|| {
                Error::InvalidInput(format!("game URL {:?} has no slug", input))
            })?
        } else {
            input.trim_matches('/').to_string()
        };

        if slug.is_empty() || slug.contains(['/', '\\', '?', '#']) || is_dot_segment(&slug) {
            return Err(Error::InvalidInput(format!("invalid game slug {:?}", slug)));
        }

        let url = self
            .base
            .join(&format!("{}/", slug))
            .map_err(|e| Error::InvalidInput(format!("invalid game slug {:?}: {}", slug, e)))?;
        Ok((slug, url))
    }
}

/// `.` or `..`, plain or percent-encoded, which a URL join would collapse
fn is_dot_segment(slug: &str) -> bool {
    let decoded = slug.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}
