//! End-to-end extraction run
//!
//! Validates the start URL, crawls, extracts modules from every fetched page and
//! returns the final deduplicated outline together with run statistics.

use crate::config::Config;
use crate::crawler::Crawler;
use crate::extract::extract_pages;
use crate::model::Module;
use crate::output::RunSummary;
use crate::url::parse_start_url;
use crate::OutlineError;
use std::time::Instant;

/// Final result of a run
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Deduplicated, normalized modules in first-occurrence order
    pub modules: Vec<Module>,

    /// Counters for the run
    pub summary: RunSummary,
}

/// Runs a full crawl and extraction from a start URL
///
/// # Arguments
///
/// * `url` - Absolute start URL (scheme and host required)
/// * `config` - Crawler and extractor configuration
///
/// # Returns
///
/// * `Ok(RunOutput)` - The outline (possibly empty) and run statistics
/// * `Err(OutlineError::Url)` - The start URL is invalid; nothing was fetched
/// * `Err(OutlineError::NoPages)` - Not a single page could be fetched
/// * `Err(OutlineError::Http)` - The HTTP client could not be built
///
/// # Example
///
/// ```no_run
/// use doc_outline::{run, Config};
///
/// # async fn example() -> Result<(), doc_outline::OutlineError> {
/// let output = run("https://docs.example.com/", &Config::default()).await?;
/// for module in &output.modules {
///     println!("{}: {} submodules", module.name, module.submodules.len());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run(url: &str, config: &Config) -> Result<RunOutput, OutlineError> {
    let start_url = parse_start_url(url)?;

    let crawl_start = Instant::now();
    let crawler = Crawler::new(config.crawler.clone())?;
    let crawl = crawler.crawl(&start_url).await;
    let crawl_time = crawl_start.elapsed();

    if crawl.pages.is_empty() {
        tracing::warn!("No pages fetched from {}", start_url);
        return Err(OutlineError::NoPages { url: start_url });
    }

    let summary = RunSummary {
        start_url,
        pages_claimed: crawl.claimed,
        pages_crawled: crawl.pages.len(),
        pages_failed: crawl.failed,
        crawl_time,
        ..Default::default()
    };

    let parse_start = Instant::now();
    let extracted = extract_pages(crawl.pages, &config.extractor).await;

    let summary = RunSummary {
        pages_parsed: extracted.pages_parsed,
        parse_time: parse_start.elapsed(),
        ..summary
    }
    .with_modules(&extracted.modules);
    summary.log();

    Ok(RunOutput {
        modules: extracted.modules,
        summary,
    })
}
