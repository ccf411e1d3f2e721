use crate::error::{Error, Result};
use crate::parsers::{compile, text};
use crate::results::MirrorLink;
use crate::utils::{resolve_url, same_site};
use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;
use url::Url;

/// Known file hosts: display name, host pattern, anchor text pattern
const KNOWN_PROVIDERS: &[(&str, &str, &str)] = &[
    ("UploadHaven", r"(^|\.)uploadhaven\.com$", r"(?i)upload\s*haven"),
    ("MegaUp", r"(^|\.)megaup\.net$", r"(?i)mega\s*up"),
    ("PixelDrain", r"(^|\.)pixeldrain\.com$", r"(?i)pixel\s*drain"),
    ("RapidGator", r"(^|\.)(rapidgator\.net|rg\.to)$", r"(?i)rapid\s*gator"),
    ("NitroFlare", r"(^|\.)nitroflare\.com$", r"(?i)nitro\s*flare"),
    ("Uploaded", r"(^|\.)(uploaded\.net|ul\.to)$", r"(?i)^uploaded$"),
    ("Mega", r"(^|\.)mega\.(nz|io)$", r"(?i)^mega(\.nz)?$"),
    ("MediaFire", r"(^|\.)mediafire\.com$", r"(?i)media\s*fire"),
    ("1Fichier", r"(^|\.)1fichier\.com$", r"(?i)1\s*fichier"),
    ("GoFile", r"(^|\.)gofile\.io$", r"(?i)go\s*file"),
];

/// Class fragments that mark an anchor as a download button
const BUTTON_CLASSES: &[&str] = &["btn-download", "download-button"];

static INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)download.*for pc using the link below").expect("instruction pattern is valid")
});

static FILE_SIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(GB|MB)\b").expect("size pattern is valid")
});

/// Shared provider table built from the known providers
pub static PROVIDERS: LazyLock<ProviderTable> = LazyLock::new(ProviderTable::default);

/// A file host recognised by host name or by link text
#[derive(Debug)]
struct Provider {
    name: String,
    host: Regex,
    label: Regex,
}

/// Identifies mirror providers from URLs and anchor text
#[derive(Debug)]
pub struct ProviderTable {
    providers: Vec<Provider>,
}

impl Default for ProviderTable {
    fn default() -> Self {
        Self::new(KNOWN_PROVIDERS).expect("Known provider patterns should be valid")
    }
}

impl ProviderTable {
    /// Build a table from `(name, host pattern, label pattern)` triples
    pub fn new(entries: &[(&str, &str, &str)]) -> std::result::Result<Self, regex::Error> {
        let mut providers = Vec::with_capacity(entries.len());
        for (name, host, label) in entries {
            providers.push(Provider {
                name: name.to_string(),
                host: Regex::new(host)?,
                label: Regex::new(label)?,
            });
        }
        Ok(Self { providers })
    }

    /// Provider serving the given URL
    pub fn by_host(&self, url: &Url) -> Option<&str> {
        let host = url.host_str()?.to_lowercase();
        self.providers
            .iter()
            .find(|p| p.host.is_match(&host))
            .map(|p| p.name.as_str())
    }

    /// Provider named by a link's text
    pub fn by_label(&self, label: &str) -> Option<&str> {
        let label = label.trim();
        self.providers
            .iter()
            .find(|p| p.label.is_match(label))
            .map(|p| p.name.as_str())
    }
}

/// Mirror links of a game page plus the file size printed next to them
#[derive(Debug, Default)]
pub struct Mirrors {
    pub links: Vec<MirrorLink>,
    pub file_size: Option<String>,
}

/// Scans anchors in document order for mirror links.
///
/// An anchor counts when it has a download button class, points at a known
/// provider, or sits in the "download ... for PC using the link below"
/// paragraph. Links back to `site` are skipped and exact URL repeats dropped.
/// A marked anchor whose provider cannot be named is a layout change and
/// fails the page.
pub fn extract(root: ElementRef<'_>, page_url: &Url, site: &Url) -> Result<Mirrors> {
    let mut mirrors = Mirrors::default();
    let Some(anchors) = compile("a[href]") else {
        return Ok(mirrors);
    };

    for anchor in root.select(&anchors) {
        let Some(url) = anchor
            .value()
            .attr("href")
            .and_then(|href| resolve_url(page_url, href))
        else {
            continue;
        };
        if same_site(&url, site) {
            continue;
        }

        let label = text::element_text(anchor);
        let provider = match PROVIDERS.by_host(&url) {
            Some(name) => name,
            None if is_button(anchor) || in_instruction(anchor) => {
                PROVIDERS.by_label(&label).ok_or_else(|| {
                    Error::parse(
                        page_url.as_str(),
                        format!("download link {} points at an unrecognised mirror host", url),
                    )
                })?
            }
            None => continue,
        };

        let url = url.to_string();
        if mirrors.links.iter().any(|m| m.url == url) {
            ::log::trace!("Skipping repeated mirror link {}", url);
            continue;
        }
        if mirrors.file_size.is_none() {
            mirrors.file_size = nearby_file_size(anchor);
        }
        mirrors.links.push(MirrorLink {
            provider: provider.to_string(),
            url,
        });
    }

    ::log::debug!(
        "Found {} mirror links on {}",
        mirrors.links.len(),
        page_url
    );
    Ok(mirrors)
}

fn is_button(anchor: ElementRef<'_>) -> bool {
    anchor
        .value()
        .classes()
        .any(|class| BUTTON_CLASSES.iter().any(|b| class.contains(b)))
}

fn in_instruction(anchor: ElementRef<'_>) -> bool {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "p" | "span"))
        .any(|el| INSTRUCTION.is_match(&text::element_text(el)))
}

/// Size such as "12.4 GB" in the text around a download link
fn nearby_file_size(anchor: ElementRef<'_>) -> Option<String> {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .take(2)
        .find_map(|el| {
            let text = text::element_text(el);
            let caps = FILE_SIZE.captures(&text)?;
            Some(format!("{} {}", &caps[1], caps[2].to_uppercase()))
        })
}
