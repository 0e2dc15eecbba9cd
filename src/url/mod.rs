//! URL handling module for doc-outline
//!
//! This module provides URL validation, fragment normalization, and same-domain
//! comparison for the crawler.

mod domain;
mod normalize;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use domain::{is_same_domain, network_location};
pub use normalize::normalize_url;

/// Checks whether a string is an absolute URL with both a scheme and a network location
///
/// Never fails: `None`, empty, and malformed input simply return `false`.
///
/// # Examples
///
/// ```
/// use doc_outline::url::is_valid_url;
///
/// assert!(is_valid_url("https://docs.python.org/3/tutorial/"));
/// assert!(!is_valid_url("not a url"));
/// assert!(!is_valid_url(None));
/// ```
pub fn is_valid_url<'a>(url: impl Into<Option<&'a str>>) -> bool {
    let Some(url) = url.into() else {
        return false;
    };

    match Url::parse(url) {
        Ok(parsed) => !parsed.scheme().is_empty() && !network_location(url).is_empty(),
        Err(_) => false,
    }
}

/// Validates the starting URL of a crawl
///
/// This is the input boundary: an invalid starting URL is reported to the caller
/// before any network activity happens.
///
/// # Returns
///
/// * `Ok(String)` - The normalized starting URL
/// * `Err(UrlError)` - The URL could not be parsed or has no network location
pub fn parse_start_url(url: &str) -> UrlResult<String> {
    let normalized = normalize_url(url.trim());

    Url::parse(&normalized).map_err(|e| UrlError::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    if !is_valid_url(normalized.as_str()) {
        return Err(UrlError::MissingHost(url.to_string()));
    }

    Ok(normalized)
}
