//! Text and DOM helpers shared by the extraction passes

use crate::ExtractError;
use scraper::{ElementRef, Selector};

/// Collapses every run of whitespace to a single space and trims both ends
///
/// # Examples
///
/// ```
/// use doc_outline::extract::clean_text;
///
/// assert_eq!(clean_text("  Hello \n\t World  "), "Hello World");
/// assert_eq!(clean_text(None), "");
/// ```
pub fn clean_text<'a>(text: impl Into<Option<&'a str>>) -> String {
    match text.into() {
        Some(text) => text.split_whitespace().collect::<Vec<_>>().join(" "),
        None => String::new(),
    }
}

/// Compiles a CSS selector, mapping failures into the pass error type
pub(crate) fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Concatenated text of an element and all its descendants
pub(crate) fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Whitespace-normalized text of an element
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    clean_text(raw_text(element).as_str())
}

/// Checks whether the element's class attribute contains any of the hints
///
/// Matching is a case-insensitive substring test against the whole attribute, so
/// `"api-reference"` matches the hint `"api"`.
pub(crate) fn has_class_hint(element: ElementRef<'_>, hints: &[&str]) -> bool {
    element
        .value()
        .attr("class")
        .map(|class| {
            let class = class.to_lowercase();
            hints.iter().any(|hint| class.contains(hint))
        })
        .unwrap_or(false)
}

/// Number of characters (not bytes) in a string
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Keeps at most `max_chars` characters of a string
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Keeps at most `max_bytes` bytes of a string, backing off to a char boundary
pub(crate) fn truncate_bytes(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }

    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// True for `h1` through `h6`
pub(crate) fn is_heading_tag(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// First element after `from` in document order (descendants of `from` included)
/// whose tag name is `tag`, searching within `root`
pub(crate) fn find_next<'a>(
    root: ElementRef<'a>,
    from: ElementRef<'a>,
    tag: &str,
) -> Option<ElementRef<'a>> {
    root.descendants()
        .skip_while(|node| node.id() != from.id())
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == tag)
}
