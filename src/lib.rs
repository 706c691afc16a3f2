//! Sumi-Lens: web content extraction and quality scoring
//!
//! This crate fetches arbitrary web pages, parses them into a structured
//! content model, and scores them for content quality, SEO and accessibility.
//! Lists of URLs are processed in fixed concurrent windows and aggregated into
//! a cross-site summary.

pub mod api;
pub mod config;
pub mod output;
pub mod report;
pub mod scrape;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Lens operations
#[derive(Debug, Error)]
pub enum LensError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid URL: {0}")]
    Validation(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failures of a single page fetch
///
/// The `Display` output of each variant is what ends up in a report's
/// `errors` list.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Response too large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("Unsupported content type: {0}. Only HTML pages can be scraped")]
    UnsupportedContentType(String),

    #[error("Network error: {0}")]
    Network(String),
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

/// Result type alias for Sumi-Lens operations
pub type Result<T> = std::result::Result<T, LensError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use report::{ContentQuality, ReportSummary, ScrapedContent, ScrapingReport};
pub use scrape::Scraper;
pub use crate::url::{validate_url, UrlValidationResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_errors_display_unwrapped() {
        let err = LensError::from(FetchError::Timeout { seconds: 5 });
        assert_eq!(err.to_string(), "Request timed out after 5s");

        let err = LensError::from(FetchError::Http {
            status: 404,
            reason: "Not Found".to_string(),
        });
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_config_errors_are_prefixed() {
        let err = LensError::from(ConfigError::Validation("timeout must be positive".into()));
        assert_eq!(
            err.to_string(),
            "Configuration error: Validation error: timeout must be positive"
        );
    }
}
