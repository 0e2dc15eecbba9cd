//! List and nested-list extraction
//!
//! Documentation sites often publish their module catalogue as a menu, table of
//! contents or plain bulleted list. Each qualifying list item becomes a module, and
//! one level of nested sub-lists supplies its submodules.

use crate::extract::text::{char_len, clean_text, element_text, has_class_hint, selector};
use crate::model::{Module, Submodules};
use crate::ExtractError;
use scraper::ElementRef;

/// Class hints that mark a container as a module catalogue
const LIST_CLASS_HINTS: &[&str] = &["menu", "nav", "list", "toc", "index", "modules"];

/// Class hints for list-like children when a container has no `<li>`
const ITEM_CLASS_HINTS: &[&str] = &["item", "entry", "module", "link"];

/// Class hints that allow an oversized list to be kept
const LARGE_LIST_CLASS_HINTS: &[&str] = &["module", "api", "doc", "toc"];

/// Class hints for nested sub-lists
const NESTED_CLASS_HINTS: &[&str] = &["submenu", "children", "nested", "sub"];

/// Class hints for emphasized names
const NAME_CLASS_HINTS: &[&str] = &["title", "name", "module"];

/// Class hints for dedicated description elements
const DESCRIPTION_CLASS_HINTS: &[&str] = &["desc", "summary", "info"];

const MIN_LIST_ITEMS: usize = 2;
const MAX_LIST_ITEMS: usize = 50;
const MAX_ITEM_CHARS: usize = 200;
const MAX_NESTED_ITEM_CHARS: usize = 100;

/// Colon prefixes shorter than this are taken as the item name
const MAX_COLON_PREFIX_CHARS: usize = 50;

/// Name and description inferred from one list item
#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemEntry {
    name: String,
    description: String,
}

/// Extracts modules from list-like containers in a content subtree
///
/// A module is emitted only when it has a name and either a description or at least
/// one submodule.
pub fn extract_from_lists(root: ElementRef<'_>) -> Result<Vec<Module>, ExtractError> {
    let mut modules = Vec::new();
    let emphasis = selector("strong, b, em, i, span")?;

    for list in candidate_lists(root)? {
        let items = list_items(list)?;

        if items.len() < MIN_LIST_ITEMS {
            continue;
        }

        if items.len() > MAX_LIST_ITEMS && !has_class_hint(list, LARGE_LIST_CLASS_HINTS) {
            tracing::trace!("Skipping list with {} items", items.len());
            continue;
        }

        for item in items {
            let item_text = element_text(item);
            if item_text.is_empty() || char_len(&item_text) > MAX_ITEM_CHARS {
                continue;
            }

            let Some(entry) = infer_entry(item, &item_text, &emphasis, true)? else {
                continue;
            };

            let submodules = nested_submodules(item)?;

            if !entry.description.is_empty() || !submodules.is_empty() {
                modules.push(Module {
                    name: entry.name,
                    description: entry.description,
                    submodules,
                });
            }
        }
    }

    Ok(modules)
}

/// Class-hinted containers, or every `ul`/`ol` when none are hinted
fn candidate_lists(root: ElementRef<'_>) -> Result<Vec<ElementRef<'_>>, ExtractError> {
    let hinted = selector("ul, ol, nav, menu, div")?;
    let lists: Vec<_> = root
        .select(&hinted)
        .filter(|element| has_class_hint(*element, LIST_CLASS_HINTS))
        .collect();

    if !lists.is_empty() {
        return Ok(lists);
    }

    let plain = selector("ul, ol")?;
    Ok(root.select(&plain).collect())
}

/// Direct `<li>` children, or class-hinted descendants when there are none
fn list_items(list: ElementRef<'_>) -> Result<Vec<ElementRef<'_>>, ExtractError> {
    let items: Vec<_> = list
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li")
        .collect();

    if !items.is_empty() {
        return Ok(items);
    }

    let fallback = selector("div, a, span")?;
    Ok(list
        .select(&fallback)
        .filter(|element| has_class_hint(*element, ITEM_CLASS_HINTS))
        .collect())
}

/// Submodules from class-hinted sub-lists nested inside an item
///
/// Every `li`, `a`, `div` and `span` inside a nested list is a candidate; the first
/// occurrence of a name wins.
fn nested_submodules(item: ElementRef<'_>) -> Result<Submodules, ExtractError> {
    let mut submodules = Submodules::new();

    let nested = selector("ul, ol, div")?;
    let nested_item = selector("li, a, div, span")?;
    let emphasis = selector("strong, b, em, i")?;

    for nested_list in item
        .select(&nested)
        .filter(|element| has_class_hint(*element, NESTED_CLASS_HINTS))
    {
        for candidate in nested_list.select(&nested_item) {
            let text = element_text(candidate);
            if text.is_empty() || char_len(&text) > MAX_NESTED_ITEM_CHARS {
                continue;
            }

            if let Some(entry) = infer_entry(candidate, &text, &emphasis, false)? {
                submodules.entry(entry.name).or_insert(entry.description);
            }
        }
    }

    Ok(submodules)
}

/// Infers a name and description for one item
///
/// Name, in order of preference: the first link's text, the first emphasized
/// element, the text before a short colon prefix, the whole item text. A link
/// `title` that differs from the link text becomes the description when the item
/// has no dedicated description element and no separator.
fn infer_entry(
    item: ElementRef<'_>,
    item_text: &str,
    emphasis: &scraper::Selector,
    require_name_class: bool,
) -> Result<Option<ItemEntry>, ExtractError> {
    let link_selector = selector("a")?;
    let link = if item.value().name() == "a" {
        Some(item)
    } else {
        item.select(&link_selector).next()
    };

    let mut title_description = None;
    let name = if let Some(link) = link {
        let text = element_text(link);
        let title = clean_text(link.value().attr("title"));
        if text.is_empty() {
            title
        } else {
            if !title.is_empty() && title != text {
                title_description = Some(title);
            }
            text
        }
    } else if let Some(emphasized) = item.select(emphasis).find(|element| {
        !require_name_class || has_class_hint(*element, NAME_CLASS_HINTS)
    }) {
        element_text(emphasized)
    } else {
        match item_text.split_once(':') {
            Some((prefix, _)) if char_len(prefix) < MAX_COLON_PREFIX_CHARS => {
                clean_text(prefix)
            }
            _ => item_text.to_string(),
        }
    };

    if name.is_empty() {
        return Ok(None);
    }

    let description = item_description(item, item_text, &name, title_description)?;
    Ok(Some(ItemEntry { name, description }))
}

/// Description from a dedicated element, the text after a separator, the link title,
/// or the text around the name, in that order
///
/// An item whose whole text is its name has no separator to split on.
fn item_description(
    item: ElementRef<'_>,
    item_text: &str,
    name: &str,
    title_description: Option<String>,
) -> Result<String, ExtractError> {
    let dedicated = selector("p, div, span")?;
    if let Some(element) = item
        .select(&dedicated)
        .find(|element| has_class_hint(*element, DESCRIPTION_CLASS_HINTS))
    {
        return Ok(element_text(element));
    }

    if name != item_text {
        let separated = item_text
            .split_once(':')
            .or_else(|| item_text.split_once(" - "));
        if let Some((_, rest)) = separated {
            return Ok(clean_text(rest));
        }
    }

    if let Some(title) = title_description {
        return Ok(title);
    }

    if name == item_text {
        return Ok(String::new());
    }

    Ok(clean_text(item_text.replacen(name, "", 1).as_str()))
}
