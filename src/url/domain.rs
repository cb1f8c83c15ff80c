use url::Url;

/// Extracts the domain from a URL
///
/// Retrieves the host portion of a URL and converts it to lowercase so that
/// allow-list comparisons are case-insensitive. Returns None if the URL has
/// no host (which should not happen for valid HTTP(S) URLs).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use doc_atlas::url::domain_of;
///
/// let url = Url::parse("https://Docs.Example.COM/path").unwrap();
/// assert_eq!(domain_of(&url), Some("docs.example.com".to_string()));
/// ```
pub fn domain_of(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if the string parses as an absolute URL with a scheme and host
///
/// This is the seed/link validity check: relative references, scheme-only
/// strings, and URLs without a host (e.g. `mailto:`) are all rejected.
pub fn is_valid_absolute_url(s: &str) -> bool {
    match Url::parse(s) {
        Ok(url) => !url.scheme().is_empty() && url.host_str().is_some(),
        Err(_) => false,
    }
}
