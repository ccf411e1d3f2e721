use crate::category::Category;
use crate::error::{Error, Result};
use crate::fetchers::PageSource;
use crate::parsers::listing;
use crate::results::{AzPage, CategoryPage, ListingPage, SearchResult};
use std::sync::Arc;
use url::Url;

/// The A-Z index never returns more entries than this per page
pub const MAX_AZ_ITEMS: usize = 100;

/// Fetches and parses search, category and A-Z listing pages
pub struct ListingFetcher<S: ?Sized> {
    source: Arc<S>,
    base: Url,
    default_limit: usize,
}

impl<S: PageSource + ?Sized> ListingFetcher<S> {
    pub fn new(source: Arc<S>, base: Url, default_limit: usize) -> Self {
        Self {
            source,
            base,
            default_limit,
        }
    }

    /// Search by title; at most `limit` results (configured default when `None`)
    pub async fn search(&self, query: &str, limit: Option<usize>) -> Result<Vec<SearchResult>> {
        let limit = limit.unwrap_or(self.default_limit);
        if limit == 0 {
            return Err(Error::InvalidInput("limit must be at least 1".into()));
        }
        let url = self.search_url(query)?;

        ::log::info!("Searching for {:?}", query.trim());
        let mut page = self.fetch_listing(&url, 1).await?;
        page.items.truncate(limit);
        Ok(page.items)
    }

    /// One page of a category listing; `category` is a slug or display name
    pub async fn list_category(&self, category: &str, page: u32) -> Result<CategoryPage> {
        let category: Category = category.parse()?;
        let url = self.category_url(category, page)?;

        ::log::info!("Listing category {} page {}", category, page);
        self.fetch_listing(&url, page).await
    }

    /// One page of the alphabetical index, optionally restricted to a letter
    pub async fn list_az(&self, letter: Option<&str>, page: u32) -> Result<AzPage> {
        let letter = letter.map(parse_letter).transpose()?;
        let url = self.az_url(letter, page)?;

        ::log::info!(
            "Listing A-Z {} page {}",
            letter.map(String::from).unwrap_or_else(|| "all".into()),
            page
        );
        let mut listing = self.fetch_listing(&url, page).await?;
        listing.items.truncate(MAX_AZ_ITEMS);
        Ok(listing)
    }

    pub fn search_url(&self, query: &str) -> Result<Url> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidInput("search query must not be empty".into()));
        }
        self.join(&format!("?s={}", urlencoding::encode(query)))
    }

    pub fn category_url(&self, category: Category, page: u32) -> Result<Url> {
        check_page(page)?;
        let mut path = format!("category/{}/", category.slug());
        if page > 1 {
            path.push_str(&format!("page/{}/", page));
        }
        self.join(&path)
    }

    pub fn az_url(&self, letter: Option<char>, page: u32) -> Result<Url> {
        check_page(page)?;
        let mut url = self.join("all-games/")?;
        if letter.is_some() || page > 1 {
            let mut query = url.query_pairs_mut();
            if let Some(letter) = letter {
                query.append_pair("letter", &letter.to_string());
            }
            if page > 1 {
                query.append_pair("page", &page.to_string());
            }
        }
        Ok(url)
    }

    async fn fetch_listing(&self, url: &Url, page: u32) -> Result<ListingPage> {
        let fetched = self.source.fetch(url.as_str()).await?;
        if !fetched.is_success() {
            return Err(Error::fetch(
                url.as_str(),
                Some(fetched.status),
                format!("HTTP {}", fetched.status),
            ));
        }

        let page_url = Url::parse(&fetched.url).unwrap_or_else(|_| url.clone());
        let listing = listing::parse(&fetched.body, &page_url, page);
        ::log::debug!(
            "{} results on {} (more: {})",
            listing.items.len(),
            url,
            listing.has_next
        );
        Ok(listing)
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::InvalidInput(format!("cannot build URL from {:?}: {}", path, e)))
    }
}

fn check_page(page: u32) -> Result<()> {
    if page == 0 {
        return Err(Error::InvalidInput("page numbers start at 1".into()));
    }
    Ok(())
}

/// A single ASCII letter, lowercased
fn parse_letter(letter: &str) -> Result<char> {
    let mut chars = letter.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_lowercase()),
        _ => Err(Error::InvalidInput(format!(
            "letter must be a single character A-Z, got {:?}",
            letter
        ))),
    }
}
