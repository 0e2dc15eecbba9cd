use url::Url;

/// Normalizes a URL by removing its fragment
///
/// Only the fragment is stripped: trailing slashes, host case, and query parameter
/// order are left exactly as given. Input that does not parse as a URL is returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use doc_outline::url::normalize_url;
///
/// assert_eq!(normalize_url("https://x.com/a#sec"), "https://x.com/a");
/// assert_eq!(normalize_url("https://x.com/a/?b=2&a=1"), "https://x.com/a/?b=2&a=1");
/// ```
pub fn normalize_url(url_str: &str) -> String {
    if Url::parse(url_str).is_err() {
        tracing::trace!("Leaving unparseable URL untouched: {}", url_str);
        return url_str.to_string();
    }

    match url_str.find('#') {
        Some(index) => url_str[..index].to_string(),
        None => url_str.to_string(),
    }
}
