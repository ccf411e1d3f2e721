use crate::parsers::{compile, has_descendant, select_all, text};
use crate::results::{RequirementSet, SystemRequirements};
use scraper::ElementRef;

/// Block elements that can hold the requirements directly
const CONTAINER_TAGS: &[&str] = &["div", "section", "ul", "ol", "table"];

/// Attribute patterns naming a requirements container
const CONTAINER_MARKERS: &[&str] = &[
    "[class*='system-req']",
    "[class*='system_req']",
    "[class*='systemreq']",
    "[class*='requirements']",
    "[id*='requirements']",
];

const HEADINGS: &[&str] = &["h2", "h3", "h4", "h5", "strong", "b"];

const LINES: &[&str] = &["li", "p"];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tier {
    Minimum,
    Recommended,
}

/// Finds and parses the system requirements block.
///
/// A missing block yields empty requirements.
pub fn extract(root: ElementRef<'_>) -> SystemRequirements {
    let Some(block) = locate(root) else {
        ::log::debug!("No system requirements block");
        return SystemRequirements::default();
    };
    parse_block(block)
}

fn locate(root: ElementRef<'_>) -> Option<ElementRef<'_>> {
    // Headings and labels styled as requirements are not the block itself
    for marker in CONTAINER_MARKERS {
        let any_tag = CONTAINER_TAGS
            .iter()
            .map(|tag| format!("{}{}", tag, marker))
            .collect::<Vec<_>>()
            .join(", ");
        if let Some(found) = compile(&any_tag).and_then(|s| root.select(&s).next()) {
            return Some(found);
        }
    }

    // Otherwise the list after a "System Requirements" heading
    let heading = select_all(root, HEADINGS).into_iter().find(|h| {
        text::element_text(*h)
            .to_lowercase()
            .contains("system requirements")
    })?;
    let heading = if heading.value().name() == "strong" || heading.value().name() == "b" {
        heading
            .parent()
            .and_then(ElementRef::wrap)
            .unwrap_or(heading)
    } else {
        heading
    };
    heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| matches!(sibling.value().name(), "ul" | "ol" | "div"))
}

/// Parses `Label: value` lines; "Minimum" / "Recommended" markers switch tiers
pub fn parse_block(block: ElementRef<'_>) -> SystemRequirements {
    let mut requirements = SystemRequirements::default();
    let mut tier = Tier::Minimum;
    let mut saw_line = false;

    for el in block.descendants().filter_map(ElementRef::wrap) {
        let name = el.value().name();
        if LINES.iter().any(|l| *l == name) && !has_descendant(el, LINES) {
            saw_line = true;
            for line in element_lines(el) {
                read_line(&line, &mut tier, &mut requirements);
            }
        } else if HEADINGS.iter().any(|h| *h == name) {
            if let Some(switched) = tier_marker(&text::element_text(el).to_lowercase()) {
                tier = switched;
            }
        }
    }

    if !saw_line {
        for line in element_lines(block) {
            read_line(&line, &mut tier, &mut requirements);
        }
    }

    requirements
}

fn read_line(line: &str, tier: &mut Tier, requirements: &mut SystemRequirements) {
    if let Some(switched) = tier_marker(&line.to_lowercase()) {
        *tier = switched;
    }

    let Some((label, value)) = text::split_label(line) else {
        return;
    };
    // "Minimum: OS: Windows 10" carries the marker as a label
    let (label, value) = if tier_marker(&label).is_some() {
        match text::split_label(&value) {
            Some(inner) => inner,
            None => return,
        }
    } else {
        (label, value)
    };

    let set = match tier {
        Tier::Minimum => &mut requirements.minimum,
        Tier::Recommended => &mut requirements.recommended,
    };
    assign(set, &label, value);
}

/// Text of an element split at `<br>` boundaries
fn element_lines(el: ElementRef<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for node in el.descendants() {
        if let Some(t) = node.value().as_text() {
            current.push_str(t);
            current.push(' ');
        } else if node.value().as_element().is_some_and(|e| e.name() == "br") {
            lines.push(std::mem::take(&mut current));
        }
    }
    lines.push(current);
    lines
        .iter()
        .map(|l| text::normalize_whitespace(l))
        .filter(|l| !l.is_empty())
        .collect()
}

fn tier_marker(text: &str) -> Option<Tier> {
    let text = text.trim_start();
    if text.starts_with("minimum") {
        Some(Tier::Minimum)
    } else if text.starts_with("recommended") {
        Some(Tier::Recommended)
    } else {
        None
    }
}

fn assign(set: &mut RequirementSet, label: &str, value: String) {
    let slot = match label {
        "os" | "operating system" => &mut set.os,
        "processor" | "cpu" => &mut set.processor,
        "memory" | "ram" => &mut set.memory,
        "graphics" | "gpu" | "video" | "video card" => &mut set.graphics,
        "storage" | "disk" | "disk space" | "hard drive" | "hard disk space" => &mut set.storage,
        _ => return,
    };
    if slot.is_none() {
        *slot = Some(value);
    }
}
