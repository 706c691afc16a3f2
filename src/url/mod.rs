//! URL handling module for Sumi-Lens
//!
//! This module provides input validation and normalization, domain
//! extraction, relative reference resolution, and internal/external link
//! classification.

mod domain;
mod validate;

use ::url::Url;

// Re-export main functions
pub use domain::{extract_domain, resolve_against};
pub use validate::{validate_url, UrlValidationResult, PROTOCOL_ADDED_WARNING};

/// Where a link points relative to the page it was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkScope {
    /// Same hostname as the source page
    Internal,
    /// Any other hostname
    External,
}

impl LinkScope {
    /// Returns true if the link stays on the source host
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Classifies a resolved link against the source page's hostname
///
/// Hostnames are compared exactly (case-insensitively); subdomains of the
/// source host count as external.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_lens::url::{classify_link, LinkScope};
///
/// let link = Url::parse("https://example.com/about").unwrap();
/// assert_eq!(classify_link(&link, "example.com"), LinkScope::Internal);
///
/// let link = Url::parse("https://blog.example.com/").unwrap();
/// assert_eq!(classify_link(&link, "example.com"), LinkScope::External);
/// ```
pub fn classify_link(link: &Url, source_domain: &str) -> LinkScope {
    match extract_domain(link) {
        Some(domain) if domain.eq_ignore_ascii_case(source_domain) => LinkScope::Internal,
        _ => LinkScope::External,
    }
}
