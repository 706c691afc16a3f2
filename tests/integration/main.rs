//! Integration tests for Sumi-Lens
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! validate, fetch, extract and score pipeline end-to-end.

mod batch_tests;
mod scrape_tests;

use sumi_lens::config::Config;
use sumi_lens::Scraper;

/// Creates a scraper with a short timeout for testing
pub fn create_test_scraper() -> Scraper {
    let mut config = Config::default();
    config.fetcher.timeout_secs = 5;
    Scraper::new(config).expect("Failed to build scraper")
}
