//! Scrape module: the per-page pipeline and batch orchestration
//!
//! This module contains the scraping engine, including:
//! - HTTP fetching with size and content-type guards
//! - HTML content extraction
//! - Content, SEO and accessibility scoring
//! - Windowed batch coordination

mod coordinator;
mod fetcher;
mod parser;
mod scoring;

pub use coordinator::{batch_windows, Scraper};
pub use fetcher::{
    build_http_client, fetch_page, is_html_content_type, parse_charset, FetchedPage,
};
pub use parser::{collapse_whitespace, extract_content};
pub use scoring::{score_content, MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS, SLOW_RESPONSE_MS};
