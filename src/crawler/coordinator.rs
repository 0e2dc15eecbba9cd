//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop:
//! - Taking batches of at most `workers` URLs from the frontier
//! - Claiming each URL in the shared store before dispatch
//! - Fetching pages concurrently and storing their HTML (empty bodies count as failures)
//! - Enqueueing discovered links in task-completion order
//!
//! The page cap is soft: a batch already in flight may push the stored page count
//! slightly past `max_pages` before the loop observes it.

use crate::config::CrawlerConfig;
use crate::crawler::frontier::{CrawlStore, Frontier, FrontierEntry};
use crate::crawler::links::extract_links;
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::model::Page;
use crate::url::normalize_url;
use crate::OutlineError;
use reqwest::Client;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// Pages and counters produced by one crawl
#[derive(Debug, Default)]
pub struct CrawlOutput {
    /// Fetched pages in the order workers stored them
    pub pages: Vec<Page>,

    /// URLs claimed (fetched or attempted)
    pub claimed: usize,

    /// URLs whose fetch failed
    pub failed: usize,
}

/// Main crawler structure
pub struct Crawler {
    config: CrawlerConfig,
    client: Client,
}

impl Crawler {
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Successfully created crawler
    /// * `Err(OutlineError)` - The HTTP client could not be built
    pub fn new(config: CrawlerConfig) -> Result<Self, OutlineError> {
        let client = build_http_client(&config)?;
        Ok(Self { config, client })
    }

    /// Crawls from a start URL until the frontier is empty or the page cap is reached
    ///
    /// Fetch failures are logged and leave the page out of the result; they never
    /// abort the crawl.
    pub async fn crawl(&self, start_url: &str) -> CrawlOutput {
        let max_pages = self.config.max_pages;
        let max_depth = self.config.max_depth;
        let timeout = Duration::from_secs(self.config.timeout_secs);
        let start_time = Instant::now();

        let store = Arc::new(Mutex::new(CrawlStore::new()));
        let mut frontier = Frontier::new();
        frontier.push(normalize_url(start_url), 0);

        tracing::info!(
            "Starting crawl of {} (max {} pages, depth {})",
            start_url,
            max_pages,
            max_depth
        );

        while !frontier.is_empty() && lock_store(&store).page_count() < max_pages {
            let batch = frontier.take_batch(self.config.workers);
            let mut tasks = JoinSet::new();

            for entry in batch {
                if entry.depth > max_depth {
                    continue;
                }

                if !lock_store(&store).claim(&entry.url) {
                    tracing::trace!("Already claimed: {}", entry.url);
                    continue;
                }

                let client = self.client.clone();
                let store = Arc::clone(&store);
                tasks.spawn(async move {
                    let links = crawl_page(&client, &entry.url, timeout, &store).await;
                    (entry, links)
                });
            }

            while let Some(joined) = tasks.join_next().await {
                let (entry, links) = match joined {
                    Ok(result) => result,
                    Err(e) => {
                        tracing::warn!("Crawl task did not complete: {}", e);
                        continue;
                    }
                };

                enqueue_links(&mut frontier, &store, &entry, links, max_depth, max_pages);
            }

            tracing::debug!(
                "Batch done: {} pages stored, {} in frontier",
                lock_store(&store).page_count(),
                frontier.len()
            );
        }

        let store = match Arc::try_unwrap(store) {
            Ok(mutex) => mutex.into_inner().unwrap_or_else(PoisonError::into_inner),
            Err(shared) => std::mem::take(&mut *lock_store(&shared)),
        };

        let output = CrawlOutput {
            claimed: store.claimed_count(),
            failed: store.failed_count(),
            pages: store.into_pages(),
        };

        tracing::info!(
            "Crawl completed: {} pages fetched, {} failed in {:?}",
            output.pages.len(),
            output.failed,
            start_time.elapsed()
        );

        output
    }
}

/// Fetches one claimed URL, stores its HTML and returns the links to follow
///
/// An empty body counts as a failed fetch. Links are extracted on a blocking thread
/// so the HTML parse never stalls the async workers.
async fn crawl_page(
    client: &Client,
    url: &str,
    timeout: Duration,
    store: &Mutex<CrawlStore>,
) -> Vec<String> {
    tracing::debug!("Fetching {}", url);

    let body = match fetch_url(client, url, timeout).await {
        FetchResult::Success {
            final_url,
            status_code,
            body,
        } => {
            tracing::trace!("HTTP {} for {} (final URL {})", status_code, url, final_url);
            body
        }
        FetchResult::HttpError { status_code } => {
            tracing::debug!("Marking {} failed: HTTP {}", url, status_code);
            lock_store(store).record_failure(url);
            return Vec::new();
        }
        FetchResult::NetworkError { error } => {
            tracing::debug!("Marking {} failed: {}", url, error);
            lock_store(store).record_failure(url);
            return Vec::new();
        }
    };

    if body.trim().is_empty() {
        tracing::warn!("Empty response body from {}", url);
        lock_store(store).record_failure(url);
        return Vec::new();
    }

    let page_url = url.to_string();
    let parsed = tokio::task::spawn_blocking(move || {
        let links = extract_links(&body, &page_url);
        (body, links)
    })
    .await;

    match parsed {
        Ok((body, links)) => {
            tracing::debug!("Found {} links on {}", links.len(), url);
            lock_store(store).record_page(url, body);
            links
        }
        Err(e) => {
            tracing::warn!("Link extraction for {} did not complete: {}", url, e);
            lock_store(store).record_failure(url);
            Vec::new()
        }
    }
}

/// Queues unseen links one level deeper than the page they came from
fn enqueue_links(
    frontier: &mut Frontier,
    store: &Mutex<CrawlStore>,
    from: &FrontierEntry,
    links: Vec<String>,
    max_depth: u32,
    max_pages: usize,
) {
    let next_depth = from.depth + 1;
    if next_depth > max_depth {
        return;
    }

    let store = lock_store(store);
    for link in links {
        if store.page_count() >= max_pages {
            break;
        }
        if !store.is_seen(&link) {
            frontier.push(link, next_depth);
        }
    }
}

fn lock_store(store: &Mutex<CrawlStore>) -> MutexGuard<'_, CrawlStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}
