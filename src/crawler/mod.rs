//! Crawler module for web page fetching
//!
//! This module contains the crawling logic, including:
//! - HTTP fetching with a browser-like header set and a size cap
//! - Link extraction restricted to the start page's network location
//! - The frontier and the shared claim-before-fetch store
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod links;

pub use coordinator::{CrawlOutput, Crawler};
pub use fetcher::{build_http_client, fetch_url, FetchResult, MAX_PAGE_BYTES};
pub use frontier::{CrawlStore, Frontier, FrontierEntry};
pub use links::extract_links;

pub use crate::model::Page;

use crate::config::CrawlerConfig;
use crate::OutlineError;

/// Runs a complete crawl from a start URL
///
/// # Arguments
///
/// * `start_url` - The page to start from
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlOutput)` - The crawl ran (possibly fetching zero pages)
/// * `Err(OutlineError)` - The HTTP client could not be built
pub async fn crawl(start_url: &str, config: CrawlerConfig) -> Result<CrawlOutput, OutlineError> {
    let crawler = Crawler::new(config)?;
    Ok(crawler.crawl(start_url).await)
}
