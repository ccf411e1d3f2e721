use scraper::ElementRef;

/// Text content of an element with all whitespace runs collapsed
pub fn element_text(el: ElementRef<'_>) -> String {
    normalize_whitespace(&el.text().collect::<Vec<_>>().join(" "))
}

/// Collapses whitespace runs into single spaces and trims the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Joins paragraphs with exactly one blank line, dropping empty ones
pub fn join_paragraphs<I, S>(paragraphs: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paragraphs
        .into_iter()
        .map(|p| normalize_whitespace(p.as_ref()))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Splits a `Label: value` line.
///
/// The label is lowercased; both sides are trimmed. Lines without a colon,
/// with an empty label, or with an empty value yield `None`.
pub fn split_label(line: &str) -> Option<(String, String)> {
    let (label, value) = line.split_once(':')?;
    let label = normalize_whitespace(label).to_lowercase();
    let value = normalize_whitespace(value);
    if label.is_empty() || value.is_empty() {
        return None;
    }
    Some((label, value))
}

/// Pushes `value` unless an equal entry is already present
pub fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}
