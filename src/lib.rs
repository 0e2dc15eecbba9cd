//! doc-outline: a documentation structure extractor
//!
//! This crate crawls a documentation website and heuristically extracts an outline of
//! modules and submodules (name + description pairs) from the rendered HTML.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for doc-outline operations
#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid URL: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Could not process {url}: no pages could be fetched")]
    NoPages { url: String },

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL '{url}': {message}")]
    Parse { url: String, message: String },

    #[error("Missing network location in URL: {0}")]
    MissingHost(String),
}

/// Errors raised inside a single extraction pass
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Result type alias for doc-outline operations
pub type Result<T> = std::result::Result<T, OutlineError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use model::Module;
pub use pipeline::{run, RunOutput};
pub use state::PageState;
pub use url::{is_same_domain, is_valid_url, normalize_url};
