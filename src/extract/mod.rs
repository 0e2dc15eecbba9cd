//! Module extraction from fetched pages
//!
//! This module turns raw HTML into [`Module`] records:
//! - Content isolation (chrome removal, main-content selection)
//! - Heading-hierarchy and list passes
//! - Optional aggressive submodule mining
//! - Cross-page deduplication and normalization
//!
//! Parsing is CPU-bound and `scraper::Html` is not `Send`, so each page is parsed
//! start to finish on a blocking thread, with a semaphore bounding how many run at once.

mod aggressive;
mod content;
mod dedup;
mod headings;
mod lists;
mod text;

pub use aggressive::{mine_submodules, MAX_SUBMODULE_CHARS, SKIP_THRESHOLD};
pub use content::ContentDocument;
pub use dedup::{dedup_modules, finalize_modules, normalize_module, NO_DESCRIPTION};
pub use headings::extract_from_headings;
pub use lists::extract_from_lists;
pub use text::clean_text;

pub(crate) use content::MAIN_CONTENT_SELECTORS;
pub(crate) use text::{selector, truncate_bytes};

use crate::config::ExtractorConfig;
use crate::model::{Module, Page};
use crate::ExtractError;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Only this many bytes of a page's HTML are parsed
pub const MAX_HTML_BYTES: usize = 300_000;

/// Page limit applied in quick mode
pub const QUICK_MODE_MAX_PAGES: usize = 20;

/// URL fragments that mark a page as worth parsing first in quick mode
const QUICK_MODE_PRIORITY: &[&str] = &["api", "doc", "reference", "module", "class"];

/// Extracts the modules defined on a single page
///
/// Runs the heading pass, then the list pass, then (when enabled) the aggressive miner
/// over their combined output. A failing pass is logged and contributes nothing; the
/// other pass still runs. No deduplication happens here.
///
/// # Arguments
///
/// * `html` - The page HTML; anything past [`MAX_HTML_BYTES`] is ignored
/// * `config` - Extraction options
///
/// # Returns
///
/// * `Ok(Vec<Module>)` - Modules in discovery order (headings first)
/// * `Err(ExtractError)` - The page could not be prepared for extraction
pub fn extract_page(html: &str, config: &ExtractorConfig) -> Result<Vec<Module>, ExtractError> {
    let html = truncate_bytes(html, MAX_HTML_BYTES);
    let document = ContentDocument::parse(html, config.quick_mode)?;
    let root = document.root();

    let mut modules = extract_from_headings(root).unwrap_or_else(|e| {
        tracing::warn!("Heading extraction failed: {}", e);
        Vec::new()
    });

    match extract_from_lists(root) {
        Ok(list_modules) => modules.extend(list_modules),
        Err(e) => tracing::warn!("List extraction failed: {}", e),
    }

    if config.aggressive {
        mine_submodules(root, &mut modules);
    }

    Ok(modules)
}

/// Result of extracting modules from a set of pages
#[derive(Debug, Clone, Default)]
pub struct ExtractOutput {
    /// Deduplicated, normalized modules
    pub modules: Vec<Module>,
    /// Number of pages whose parse completed successfully
    pub pages_parsed: usize,
}

/// Extracts, deduplicates and normalizes modules across all crawled pages
///
/// Pages are parsed in parallel on blocking threads, at most `config.workers` at a
/// time. Results are merged in page order, so the first page to define a module name
/// wins. A page that fails to parse, or whose task panics, contributes zero modules
/// and is not counted as parsed.
pub async fn extract_pages(pages: Vec<Page>, config: &ExtractorConfig) -> ExtractOutput {
    let pages = if config.quick_mode {
        select_quick_pages(pages)
    } else {
        pages
    };

    tracing::info!("Parsing {} pages with {} workers", pages.len(), config.workers);

    let semaphore = Arc::new(Semaphore::new(config.workers.max(1)));
    let mut handles = Vec::with_capacity(pages.len());

    for page in pages {
        let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
            break;
        };
        let options = config.clone();
        let url = page.url.clone();

        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            extract_page(&page.html, &options)
        });
        handles.push((url, handle));
    }

    let mut modules = Vec::new();
    let mut pages_parsed = 0;
    for (url, handle) in handles {
        match handle.await {
            Ok(Ok(page_modules)) => {
                tracing::info!("Extracted {} modules from {}", page_modules.len(), url);
                pages_parsed += 1;
                modules.extend(page_modules);
            }
            Ok(Err(e)) => tracing::warn!("Failed to parse {}: {}", url, e),
            Err(e) => tracing::warn!("Parse task for {} did not complete: {}", url, e),
        }
    }

    ExtractOutput {
        modules: finalize_modules(modules),
        pages_parsed,
    }
}

/// Picks at most [`QUICK_MODE_MAX_PAGES`] pages, reference-looking URLs first
fn select_quick_pages(pages: Vec<Page>) -> Vec<Page> {
    if pages.len() <= QUICK_MODE_MAX_PAGES {
        return pages;
    }

    let (priority, rest): (Vec<Page>, Vec<Page>) = pages.into_iter().partition(|page| {
        let url = page.url.to_lowercase();
        QUICK_MODE_PRIORITY.iter().any(|hint| url.contains(hint))
    });

    tracing::debug!(
        "Quick mode: {} priority pages, limiting to {}",
        priority.len(),
        QUICK_MODE_MAX_PAGES
    );

    priority
        .into_iter()
        .chain(rest)
        .take(QUICK_MODE_MAX_PAGES)
        .collect()
}
