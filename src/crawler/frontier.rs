//! Crawl frontier and shared crawl store
//!
//! The frontier is a plain FIFO of `(url, depth)` entries owned by the crawl loop.
//! The store is shared with fetch workers behind a mutex and is the single place
//! where URLs are claimed, so a URL is fetched at most once per crawl.

use crate::model::Page;
use crate::state::PageState;
use indexmap::IndexMap;
use std::collections::{HashMap, VecDeque};

/// A URL waiting to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The normalized URL to fetch
    pub url: String,

    /// Link distance from the start page
    pub depth: u32,
}

/// FIFO queue of URLs to crawl
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a URL at the back of the queue
    pub fn push(&mut self, url: impl Into<String>, depth: u32) {
        self.queue.push_back(FrontierEntry {
            url: url.into(),
            depth,
        });
    }

    /// Removes and returns up to `size` entries from the front
    pub fn take_batch(&mut self, size: usize) -> Vec<FrontierEntry> {
        let count = size.min(self.queue.len());
        self.queue.drain(..count).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Visited set and fetched pages for one crawl
///
/// Pages are kept in the order workers stored them.
#[derive(Debug, Default)]
pub struct CrawlStore {
    visited: HashMap<String, PageState>,
    pages: IndexMap<String, String>,
}

impl CrawlStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a URL for fetching
    ///
    /// Returns false if the URL was already claimed, in which case the caller must
    /// not fetch it.
    pub fn claim(&mut self, url: &str) -> bool {
        if self.visited.contains_key(url) {
            return false;
        }
        self.visited.insert(url.to_string(), PageState::Claimed);
        true
    }

    /// Whether a URL has been claimed at any point during this crawl
    pub fn is_seen(&self, url: &str) -> bool {
        self.visited.contains_key(url)
    }

    /// Stores the HTML of a claimed URL
    ///
    /// Returns false if the URL was not in the claimed state.
    pub fn record_page(&mut self, url: &str, html: String) -> bool {
        if !self.transition(url, PageState::Fetched) {
            return false;
        }
        self.pages.insert(url.to_string(), html);
        true
    }

    /// Marks a claimed URL as failed
    pub fn record_failure(&mut self, url: &str) -> bool {
        self.transition(url, PageState::Failed)
    }

    fn transition(&mut self, url: &str, next: PageState) -> bool {
        match self.visited.get_mut(url) {
            Some(state) if state.can_transition_to(next) => {
                *state = next;
                true
            }
            _ => {
                tracing::debug!("Ignoring {} for {} (not claimed)", next, url);
                false
            }
        }
    }

    /// Number of pages stored so far
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of URLs whose fetch failed
    pub fn failed_count(&self) -> usize {
        self.visited
            .values()
            .filter(|state| state.is_terminal() && !state.is_success())
            .count()
    }

    /// Number of URLs claimed so far
    pub fn claimed_count(&self) -> usize {
        self.visited.len()
    }

    /// Consumes the store, returning pages in storage order
    pub fn into_pages(self) -> Vec<Page> {
        self.pages
            .into_iter()
            .map(|(url, html)| Page { url, html })
            .collect()
    }
}
