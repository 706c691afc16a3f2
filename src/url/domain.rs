use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (e.g. `mailto:` or `data:` URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_lens::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Resolves an attribute value (href, src) against the page URL
///
/// Returns None for empty values and values that do not form a valid URL.
pub fn resolve_against(base_url: &Url, value: &str) -> Option<Url> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    base_url.join(value).ok()
}
