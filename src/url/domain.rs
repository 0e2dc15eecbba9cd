/// Returns the network location (`user:pass@host:port`) of a URL string
///
/// The value is sliced from the raw string so that comparisons see exactly what the
/// page author wrote. URLs without a `//` authority yield an empty string.
///
/// # Examples
///
/// ```
/// use doc_outline::url::network_location;
///
/// assert_eq!(network_location("https://example.com:8080/path"), "example.com:8080");
/// assert_eq!(network_location("mailto:someone@example.com"), "");
/// ```
pub fn network_location(url: &str) -> &str {
    let Some((_, rest)) = url.split_once("://") else {
        return "";
    };

    let end = rest.find(&['/', '?', '#'][..]).unwrap_or(rest.len());
    &rest[..end]
}

/// Checks whether two URLs share the same network location
///
/// The comparison is byte-for-byte: `docs.example.com` and `example.com` are
/// different domains, and so are `example.com` and `example.com:80`.
pub fn is_same_domain(url1: &str, url2: &str) -> bool {
    network_location(url1) == network_location(url2)
}
