//! HTML extraction for the listing site.
//!
//! Every field is described by a [`FieldRule`]: an ordered list of CSS
//! selectors and how to read a value out of the first match. Rules fail
//! independently; a rule that matches nothing yields `None` and the caller
//! picks the default.

pub mod detail;
pub mod listing;
pub mod mirrors;
pub mod requirements;
pub mod text;

#[cfg(test)]
pub(crate) mod tests;

use scraper::{ElementRef, Selector};

/// How a value is read from a matched element
#[derive(Debug, Clone, Copy)]
pub enum Extract {
    /// Whitespace-normalized text content
    Text,
    /// First non-empty attribute among the listed names
    Attr(&'static [&'static str]),
}

/// Maps a semantic field to the structural rules that locate it
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub selectors: &'static [&'static str],
    pub extract: Extract,
}

impl FieldRule {
    pub const fn text(field: &'static str, selectors: &'static [&'static str]) -> Self {
        Self {
            field,
            selectors,
            extract: Extract::Text,
        }
    }

    pub const fn attr(
        field: &'static str,
        selectors: &'static [&'static str],
        attrs: &'static [&'static str],
    ) -> Self {
        Self {
            field,
            selectors,
            extract: Extract::Attr(attrs),
        }
    }

    /// Value of the first element, in selector priority order, that yields one
    pub fn first(&self, scope: ElementRef<'_>) -> Option<String> {
        for selector in self.selectors.iter().filter_map(|s| compile(s)) {
            if let Some(value) = scope.select(&selector).find_map(|el| self.read(el)) {
                return Some(value);
            }
        }
        ::log::trace!("field {} not found", self.field);
        None
    }

    /// Values of every matching element, in document order, first selector that matches wins
    pub fn all(&self, scope: ElementRef<'_>) -> Vec<String> {
        for selector in self.selectors.iter().filter_map(|s| compile(s)) {
            let values: Vec<String> = scope
                .select(&selector)
                .filter_map(|el| self.read(el))
                .collect();
            if !values.is_empty() {
                return values;
            }
        }
        Vec::new()
    }

    /// First element matched by the rule's selectors
    pub fn element<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.selectors
            .iter()
            .filter_map(|s| compile(s))
            .find_map(|selector| scope.select(&selector).next())
    }

    fn read(&self, el: ElementRef<'_>) -> Option<String> {
        let value = match self.extract {
            Extract::Text => text::element_text(el),
            Extract::Attr(attrs) => attrs
                .iter()
                .filter_map(|name| el.value().attr(name))
                .map(str::trim)
                .find(|v| !v.is_empty() && !v.starts_with("data:"))?
                .to_string(),
        };
        if value.is_empty() { None } else { Some(value) }
    }
}

/// Compile a selector from a rule table; a bad entry is logged and skipped
pub fn compile(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(compiled) => Some(compiled),
        Err(e) => {
            ::log::warn!("Skipping invalid selector {:?}: {}", selector, e);
            None
        }
    }
}

/// All elements matched by any of the selectors, each element once, in document order
pub fn select_all<'a>(scope: ElementRef<'a>, selectors: &[&str]) -> Vec<ElementRef<'a>> {
    let compiled: Vec<Selector> = selectors.iter().filter_map(|s| compile(s)).collect();
    scope
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| compiled.iter().any(|s| s.matches(el)))
        .collect()
}

/// Whether any element below `el` has one of the given tag names
pub fn has_descendant(el: ElementRef<'_>, names: &[&str]) -> bool {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|child| {
            let name = child.value().name();
            names.iter().any(|n| *n == name)
        })
}
