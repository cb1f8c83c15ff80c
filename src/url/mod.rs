//! URL handling module for Doc-Atlas
//!
//! This module provides URL validation, domain extraction, relative link
//! resolution, allow-list matching, and file-extension filtering.

mod domain;
mod resolve;

// Re-export main functions
pub use domain::{domain_of, is_valid_absolute_url};
pub use resolve::resolve;

/// File extensions that are never enqueued, regardless of domain validity.
/// These are direct downloads rather than documentation pages.
const EXCLUDED_EXTENSIONS: &[&str] = &[".pdf", ".zip", ".png", ".jpg"];

/// Returns true if the URL's host is one of the allowed domains
///
/// Matching is exact and case-insensitive: the host must equal one of the
/// configured domains after lowercasing. A URL without a host never matches.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use doc_atlas::url::is_allowed_domain;
///
/// let url = Url::parse("https://Docs.Example.com/page").unwrap();
/// let allowed = vec!["docs.example.com".to_string()];
/// assert!(is_allowed_domain(&url, &allowed));
/// ```
pub fn is_allowed_domain(url: &url::Url, allowed: &[String]) -> bool {
    match domain_of(url) {
        Some(domain) => allowed.iter().any(|d| d.eq_ignore_ascii_case(&domain)),
        None => false,
    }
}

/// Returns true if the URL path ends in an excluded file extension
pub fn has_excluded_extension(url: &url::Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    EXCLUDED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
