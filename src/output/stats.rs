//! Run statistics
//!
//! This module collects the counters of one extraction run and renders them for
//! logs or the terminal.

use crate::model::Module;
use std::time::Duration;

/// Counters for one run, from crawl through extraction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Normalized start URL
    pub start_url: String,

    /// URLs claimed by the crawler (fetched or attempted)
    pub pages_claimed: usize,

    /// Pages fetched and stored
    pub pages_crawled: usize,

    /// URLs whose fetch failed
    pub pages_failed: usize,

    /// Pages whose parse completed
    pub pages_parsed: usize,

    /// Modules after deduplication
    pub modules: usize,

    /// Submodules across all modules
    pub submodules: usize,

    /// Wall-clock time of the crawl phase
    pub crawl_time: Duration,

    /// Wall-clock time of the parse phase
    pub parse_time: Duration,
}

impl RunSummary {
    /// Fills the module counters from a final module list
    pub fn with_modules(mut self, modules: &[Module]) -> Self {
        self.modules = modules.len();
        self.submodules = modules.iter().map(|m| m.submodules.len()).sum();
        self
    }

    /// Fetch success rate as a percentage of claimed URLs
    pub fn success_rate(&self) -> f64 {
        if self.pages_claimed == 0 {
            return 0.0;
        }
        (self.pages_crawled as f64 / self.pages_claimed as f64) * 100.0
    }

    /// Multi-line, human-readable rendering
    pub fn format(&self) -> String {
        let mut out = String::new();

        out.push_str("=== Extraction Summary ===\n\n");
        out.push_str(&format!("Start URL: {}\n", self.start_url));
        out.push_str(&format!("Crawl time: {:.2}s\n", self.crawl_time.as_secs_f64()));
        out.push_str(&format!("Parse time: {:.2}s\n\n", self.parse_time.as_secs_f64()));

        out.push_str("Pages:\n");
        out.push_str(&format!("  Claimed: {}\n", self.pages_claimed));
        out.push_str(&format!(
            "  Crawled: {} ({:.1}%)\n",
            self.pages_crawled,
            self.success_rate()
        ));
        out.push_str(&format!("  Failed: {}\n", self.pages_failed));
        out.push_str(&format!("  Parsed: {}\n\n", self.pages_parsed));

        out.push_str("Outline:\n");
        out.push_str(&format!("  Modules: {}\n", self.modules));
        out.push_str(&format!("  Submodules: {}\n", self.submodules));

        out
    }

    /// Emits the summary as a single `info` event
    pub fn log(&self) {
        tracing::info!(
            "Run finished for {}: {} modules, {} submodules from {} parsed of {} crawled pages (crawl {:.2}s, parse {:.2}s)",
            self.start_url,
            self.modules,
            self.submodules,
            self.pages_parsed,
            self.pages_crawled,
            self.crawl_time.as_secs_f64(),
            self.parse_time.as_secs_f64()
        );
    }
}
