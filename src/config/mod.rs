//! Configuration module for doc-outline
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file section falls back to the defaults used by
//! the command-line tool.
//!
//! # Example
//!
//! ```no_run
//! use doc_outline::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("outline.toml")).unwrap();
//! println!("Crawler will fetch at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, ExtractorConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
