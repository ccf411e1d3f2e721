use crate::parsers::{FieldRule, compile, text};
use crate::results::{ListingPage, SearchResult};
use crate::utils::{resolve_url, slug_from_url};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::collections::BTreeSet;
use std::sync::LazyLock;
use url::Url;

/// Result block containers; the first selector with any match defines the page's entries
const CONTAINERS: &[&str] = &[
    "div.cover-item",
    "div.su-pop-item",
    "article.post",
];

const TITLE: FieldRule = FieldRule::text(
    "title",
    &[
        ".cover-item-title a h1",
        ".cover-item-title a",
        ".info a",
        ".entry-title a",
        "h1",
        "h2",
    ],
);

const LINK: FieldRule = FieldRule::attr(
    "link",
    &[
        ".cover-item-title a[href]",
        ".info a[href]",
        ".entry-title a[href]",
        "a[href]",
    ],
    &["href"],
);

const THUMBNAIL: FieldRule = FieldRule::attr(
    "thumbnail",
    &[".cover-item-image img", ".img img", "img"],
    &["data-wpfc-original-src", "data-src", "src"],
);

const TAGS: FieldRule = FieldRule::text(
    "tags",
    &[
        "a[rel~='category']",
        "a[rel~='tag']",
        ".cover-item-category a",
    ],
);

const NEXT_PAGE: &[&str] = &[
    "a.next",
    "a[rel='next']",
    "link[rel='next']",
    ".pagination .next a",
];

static PAGE_IN_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:/page/(\d+)/?|[?&](?:page|paged)=(\d+))").expect("page pattern is valid")
});

/// Parses a listing page into result records.
///
/// `base` resolves relative links; `page` is the page number that was requested.
/// Entries missing a title or a resolvable link are dropped.
pub fn parse(html: &str, base: &Url, page: u32) -> ListingPage {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let entries = containers(root);
    let total = entries.len();
    let items: Vec<SearchResult> = entries
        .into_iter()
        .filter_map(|entry| parse_entry(entry, base))
        .collect();

    if items.len() < total {
        ::log::debug!(
            "Dropped {} of {} listing entries without a title or link",
            total - items.len(),
            total
        );
    }

    ListingPage {
        items,
        page,
        has_next: has_next_page(root, page),
    }
}

fn containers(root: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    for selector in CONTAINERS.iter().filter_map(|s| compile(s)) {
        let found: Vec<ElementRef<'_>> = root.select(&selector).collect();
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}

/// Builds one result from a container, or `None` when required fields are missing
pub fn parse_entry(entry: ElementRef<'_>, base: &Url) -> Option<SearchResult> {
    let title = TITLE.first(entry)?;
    let url = LINK.first(entry).and_then(|href| resolve_url(base, &href))?;
    let slug = slug_from_url(&url)?;

    let thumbnail = THUMBNAIL
        .first(entry)
        .and_then(|src| resolve_url(base, &src))
        .map(String::from);

    let tags: BTreeSet<String> = TAGS
        .all(entry)
        .into_iter()
        .map(|t| text::normalize_whitespace(&t))
        .collect();

    Some(SearchResult {
        title,
        slug,
        url: url.to_string(),
        thumbnail,
        tags,
    })
}

/// Whether the page's own pagination links to a following page
fn has_next_page(root: ElementRef<'_>, page: u32) -> bool {
    if NEXT_PAGE
        .iter()
        .filter_map(|s| compile(s))
        .any(|selector| root.select(&selector).next().is_some())
    {
        return true;
    }

    let wanted = page.saturating_add(1);
    compile("a[href]").is_some_and(|anchors| {
        root.select(&anchors)
            .filter_map(|a| a.value().attr("href"))
            .any(|href| page_number(href) == Some(wanted))
    })
}

/// Page number encoded in a pagination href
pub fn page_number(href: &str) -> Option<u32> {
    let caps = PAGE_IN_HREF.captures(href)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .and_then(|m| m.as_str().parse().ok())
}
