//! Link extraction for the crawl frontier
//!
//! Only the main-content area is scanned (falling back to the whole document), and
//! only same-domain links survive. Links that look like reference documentation are
//! moved to the front so that a small page budget is spent on them first.

use crate::extract::{selector, MAIN_CONTENT_SELECTORS};
use crate::url::{is_same_domain, is_valid_url, normalize_url};
use scraper::Html;
use url::Url;

/// Anchors examined per page
const MAX_ANCHORS: usize = 100;

/// Links returned per page
const MAX_LINKS: usize = 50;

/// URL or link-text fragments that mark a link as documentation
const PRIORITY_KEYWORDS: &[&str] = &[
    "doc", "api", "reference", "guide", "manual", "tutorial", "module", "class", "function",
];

/// Extracts same-domain links to follow from a page
///
/// # Link Extraction Rules
///
/// **Include:**
/// - The first 100 `<a href="...">` tags inside the main-content container
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Fragment-only links (same page anchors)
/// - Links to another network location
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - The URL the page was fetched from, used to resolve relative links
///
/// # Returns
///
/// At most 50 normalized absolute URLs, priority links first, each group in
/// document order. Duplicates are possible; the crawler's claim step drops them.
///
/// # Example
///
/// ```
/// use doc_outline::crawler::extract_links;
///
/// let html = r#"<html><body><a href="/docs/api">API</a><a href="https://other.com/">x</a></body></html>"#;
/// let links = extract_links(html, "https://example.com/");
/// assert_eq!(links, vec!["https://example.com/docs/api".to_string()]);
/// ```
pub fn extract_links(html: &str, page_url: &str) -> Vec<String> {
    let Ok(base_url) = Url::parse(page_url) else {
        tracing::debug!("Cannot resolve links against {}", page_url);
        return Vec::new();
    };

    let (Ok(main), Ok(anchors)) = (selector(MAIN_CONTENT_SELECTORS), selector("a[href]")) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let scope = document
        .select(&main)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut priority = Vec::new();
    let mut normal = Vec::new();

    for anchor in scope.select(&anchors).take(MAX_ANCHORS) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let Some(url) = resolve_link(href, &base_url, page_url) else {
            continue;
        };

        let text = anchor.text().collect::<String>().to_lowercase();
        let lowered = url.to_lowercase();
        let is_priority = PRIORITY_KEYWORDS
            .iter()
            .any(|keyword| lowered.contains(keyword) || text.contains(keyword));

        if is_priority {
            priority.push(url);
        } else {
            normal.push(url);
        }
    }

    priority.extend(normal);
    priority.truncate(MAX_LINKS);
    priority
}

/// Resolves an href to a normalized same-domain URL
///
/// Returns None if the link should be excluded.
fn resolve_link(href: &str, base_url: &Url, page_url: &str) -> Option<String> {
    if href.starts_with("javascript:")
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    let normalized = normalize_url(absolute.as_str());

    if is_valid_url(normalized.as_str()) && is_same_domain(&normalized, page_url) {
        Some(normalized)
    } else {
        None
    }
}
