//! Heading-hierarchy extraction
//!
//! Walks headings in document order and turns them into modules (levels 1-2) and
//! submodules (deeper levels). The hierarchy is tracked with an explicit stack of
//! `(level, node index)` pairs over a flat arena, so no node holds a reference to
//! another.

use crate::extract::text::{
    char_len, clean_text, element_text, has_class_hint, is_heading_tag, selector, truncate_chars,
};
use crate::model::Module;
use crate::ExtractError;
use scraper::ElementRef;

/// Headings longer than this are treated as prose, not titles
pub const MAX_HEADING_CHARS: usize = 100;

/// Sibling text collected for a heading's description is cut at this many characters
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Class hints for elements that act as headings on pages without `<h1>`-`<h6>`
const HEADING_CLASS_HINTS: &[&str] = &["title", "heading", "header", "module", "section"];

/// Elements whose text is folded into the preceding heading's description
const DESCRIPTION_TAGS: &[&str] = &["p", "div", "span", "section"];

/// One heading in the outline arena
#[derive(Debug, Clone)]
struct OutlineNode {
    name: String,
    description: String,
    level: u8,
    children: Vec<usize>,
}

/// Extracts modules from the heading hierarchy of a content subtree
///
/// A heading at level 1 or 2 starts a new module. A deeper heading becomes a
/// submodule of the nearest shallower heading on the stack, and is itself pushed so
/// that even deeper headings attach to it. Only modules and their direct children
/// are reported; grandchildren stay in the arena. Duplicate names are not merged here.
pub fn extract_from_headings(root: ElementRef<'_>) -> Result<Vec<Module>, ExtractError> {
    let headings = collect_headings(root)?;

    let mut arena: Vec<OutlineNode> = Vec::new();
    let mut modules: Vec<usize> = Vec::new();
    let mut stack: Vec<(u8, usize)> = Vec::new();

    for heading in headings {
        let name = element_text(heading);
        if name.is_empty() || char_len(&name) > MAX_HEADING_CHARS {
            tracing::trace!("Skipping heading of {} chars", char_len(&name));
            continue;
        }

        let level = heading_level(heading);
        let description = sibling_description(heading);

        let index = arena.len();
        arena.push(OutlineNode {
            name,
            description,
            level,
            children: Vec::new(),
        });

        if level <= 2 {
            modules.push(index);
            stack.clear();
            stack.push((level, index));
            continue;
        }

        let Some(&current_module) = modules.last() else {
            // Deep heading before any module heading
            continue;
        };

        while stack.last().is_some_and(|&(top_level, _)| top_level >= level) {
            stack.pop();
        }

        let parent = stack.last().map(|&(_, parent)| parent).unwrap_or(current_module);
        arena[parent].children.push(index);
        stack.push((level, index));
    }

    Ok(modules
        .into_iter()
        .map(|index| {
            let node = &arena[index];
            let mut module = Module::new(node.name.clone(), node.description.clone());
            for &child in &node.children {
                module.set_submodule(arena[child].name.clone(), arena[child].description.clone());
            }
            module
        })
        .collect())
}

/// Finds headings in document order, falling back to class-hinted containers
fn collect_headings(root: ElementRef<'_>) -> Result<Vec<ElementRef<'_>>, ExtractError> {
    let standard = selector("h1, h2, h3, h4, h5, h6")?;
    let headings: Vec<_> = root.select(&standard).collect();
    if !headings.is_empty() {
        return Ok(headings);
    }

    let candidates = selector("div[class], span[class]")?;
    Ok(root
        .select(&candidates)
        .filter(|element| has_class_hint(*element, HEADING_CLASS_HINTS))
        .collect())
}

/// Numeric level from the tag name, or a class-based guess for non-standard headings
fn heading_level(heading: ElementRef<'_>) -> u8 {
    let name = heading.value().name();
    if is_heading_tag(name) {
        return name[1..].parse().unwrap_or(3);
    }

    if has_class_hint(heading, &["subtitle"]) {
        2
    } else if has_class_hint(heading, &["title"]) {
        1
    } else {
        3
    }
}

/// Text of the siblings following a heading, up to the next heading
fn sibling_description(heading: ElementRef<'_>) -> String {
    let mut description = String::new();
    let mut length = 0;

    for node in heading.next_siblings() {
        if let Some(element) = ElementRef::wrap(node) {
            let name = element.value().name();
            if is_heading_tag(name) {
                break;
            }
            if DESCRIPTION_TAGS.contains(&name) {
                let text: String = element.text().collect();
                length += char_len(&text) + 1;
                description.push_str(&text);
                description.push(' ');
            }
        }

        if length > MAX_DESCRIPTION_CHARS {
            let mut truncated = truncate_chars(&description, MAX_DESCRIPTION_CHARS).to_string();
            truncated.push_str("...");
            description = truncated;
            break;
        }
    }

    clean_text(description.as_str())
}
