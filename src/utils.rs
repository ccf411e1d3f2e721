use std::time::{Duration, SystemTime};
use url::Url;

/// Resolve an href found on a page against the page URL.
///
/// Fragments, scripts and inline data never resolve.
pub fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("data:")
        || href.starts_with("mailto:")
    {
        return None;
    }

    let resolved = base.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved),
        _ => None,
    }
}

/// Last non-empty path segment of a game URL
pub fn slug_from_url(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()
        .map(|segment| segment.to_string())
}

/// Whether two URLs point at the same host, ignoring a leading `www.`
pub fn same_site(a: &Url, b: &Url) -> bool {
    fn bare(url: &Url) -> Option<&str> {
        url.host_str().map(|h| h.trim_start_matches("www."))
    }
    bare(a).is_some() && bare(a) == bare(b)
}

/// Pick an entry from a list without pulling in a random number generator
pub fn rotate<T>(items: &[T]) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_nanos() as usize)
        .unwrap_or(0);
    items.get(nanos % items.len())
}

/// Format a duration as fractional seconds for log lines
pub fn secs(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}
