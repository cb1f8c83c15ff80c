use url::Url;

/// Resolves a possibly-relative href against a base URL
///
/// Returns None (instead of an error) when the link should be skipped:
/// - empty or fragment-only hrefs (same-page anchors)
/// - `javascript:`, `mailto:`, `tel:` and `data:` schemes
/// - hrefs that fail to resolve against the base
/// - anything that resolves to a non-HTTP(S) URL
///
/// Callers drop such links silently; a malformed discovered link is never a
/// crawl error.
pub fn resolve(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}
