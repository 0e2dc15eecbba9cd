use serde::Deserialize;

/// Browser-like user agent sent with every request unless overridden
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for doc-outline
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages stored before the crawl stops
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Maximum link depth from the start page (0 = start page only)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Number of concurrent fetch workers
    pub workers: usize,

    /// User agent header value
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 20,
            timeout_secs: 5,
            max_depth: 1,
            workers: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Extraction behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Number of pages parsed in parallel
    pub workers: usize,

    /// Run the aggressive submodule miner after the heading and list passes
    pub aggressive: bool,

    /// Strip more page chrome and parse at most 20 pages
    #[serde(rename = "quick-mode")]
    pub quick_mode: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            workers: 5,
            aggressive: true,
            quick_mode: false,
        }
    }
}
