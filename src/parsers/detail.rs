use crate::error::{Error, Result};
use crate::parsers::{FieldRule, compile, has_descendant, mirrors, requirements, select_all, text};
use crate::results::GameDetail;
use crate::utils::resolve_url;
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;
use url::Url;

const TITLE: FieldRule = FieldRule::text(
    "title",
    &["h1.entry-title", "h1.post-title", "h1", "h2.post-title", ".entry-title"],
);

const OG_TITLE: FieldRule =
    FieldRule::attr("og:title", &["meta[property='og:title']"], &["content"]);

const THUMBNAIL: FieldRule = FieldRule::attr(
    "thumbnail",
    &[
        "img[class*='featured']",
        "img[class*='thumb']",
        "img[class*='wp-post-image']",
        "meta[property='og:image']",
    ],
    &["data-wpfc-original-src", "data-src", "src", "content"],
);

const CONTENT: FieldRule = FieldRule::text(
    "content",
    &[
        "div.entry-content",
        "div.post-content",
        "div[class*='entry']",
        "div[class*='content']",
    ],
);

const META_DESCRIPTION: FieldRule = FieldRule::attr(
    "meta description",
    &["meta[name='description']", "meta[property='og:description']"],
    &["content"],
);

const SCREENSHOTS: FieldRule = FieldRule::attr(
    "screenshots",
    &[
        "img[class*='screenshot']",
        "img[class*='gallery']",
        ".gallery img",
        "[class*='screenshots'] img",
    ],
    &["data-wpfc-original-src", "data-src", "src"],
);

const GENRES: FieldRule = FieldRule::text("genres", &["a[rel~='category']"]);

/// Elements that may hold `Developer: ...` style metadata lines
const META_LINES: &[&str] = &["li", "p", "span", "div[class*='meta']", "div[class*='info']"];

/// Paragraph holding the download instructions, kept out of the description
static DOWNLOAD_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)for pc using the link below").expect("pattern is valid"));

/// Parses a game page.
///
/// `page_url` is the canonical page URL, `site` the listing site root.
/// Fails with [`Error::NotFound`] on the site's "not found" template and with
/// [`Error::Parse`] when no title can be located at all.
pub fn parse(html: &str, slug: &str, page_url: &Url, site: &Url) -> Result<GameDetail> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    if is_not_found_page(root) {
        return Err(Error::NotFound {
            url: page_url.to_string(),
        });
    }

    let title = TITLE
        .first(root)
        .or_else(|| OG_TITLE.first(root))
        .ok_or_else(|| Error::parse(page_url.as_str(), "no title element"))?;

    let mirrors = mirrors::extract(root, page_url, site)?;

    let mut screenshots = Vec::new();
    for src in SCREENSHOTS.all(root) {
        if let Some(url) = resolve_url(page_url, &src) {
            text::push_unique(&mut screenshots, url.to_string());
        }
    }

    let mut genres = Vec::new();
    for genre in GENRES.all(root) {
        text::push_unique(&mut genres, genre);
    }

    let meta = metadata(root);

    Ok(GameDetail {
        slug: slug.to_string(),
        url: page_url.to_string(),
        title,
        thumbnail: THUMBNAIL
            .first(root)
            .and_then(|src| resolve_url(page_url, &src))
            .map(String::from),
        description: description(root),
        requirements: requirements::extract(root),
        screenshots,
        download_links: mirrors.links,
        file_size: mirrors.file_size,
        genres,
        developer: meta.developer,
        publisher: meta.publisher,
        release_date: meta.release_date,
    })
}

/// WordPress serves its 404 template with `<body class="error404">`
fn is_not_found_page(root: ElementRef<'_>) -> bool {
    compile("body.error404").is_some_and(|s| root.select(&s).next().is_some())
}

/// Paragraphs of the content container, without the download instructions
fn description(root: ElementRef<'_>) -> String {
    if let Some(content) = CONTENT.element(root) {
        let paragraphs: Vec<String> = select_all(content, &["p"])
            .into_iter()
            .map(text::element_text)
            .filter(|p| !DOWNLOAD_PARAGRAPH.is_match(p))
            .collect();
        let joined = text::join_paragraphs(&paragraphs);
        if !joined.is_empty() {
            return joined;
        }
    }
    META_DESCRIPTION.first(root).unwrap_or_default()
}

#[derive(Default)]
struct Metadata {
    developer: Option<String>,
    publisher: Option<String>,
    release_date: Option<String>,
}

fn metadata(root: ElementRef<'_>) -> Metadata {
    let mut meta = Metadata::default();
    for el in select_all(root, META_LINES) {
        // Only innermost blocks, so a container never merges its children's lines
        if has_descendant(el, &["li", "p", "div"]) {
            continue;
        }
        let Some((label, value)) = text::split_label(&text::element_text(el)) else {
            continue;
        };
        let slot = match label.as_str() {
            "developer" | "developers" | "dev" => &mut meta.developer,
            "publisher" | "publishers" | "pub" => &mut meta.publisher,
            "release date" | "released" | "release" => &mut meta.release_date,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }
    meta
}
