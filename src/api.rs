//! JSON request/response boundary
//!
//! An HTTP handler hands the raw request body to [`handle_request`] and
//! serializes the returned [`ScrapeResponse`]. Status codes are left to the
//! caller.

use crate::report::ScrapingReport;
use crate::scrape::Scraper;
use serde::{Deserialize, Serialize};

/// Body of a scrape request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
    /// Free-form label from the caller, logged and otherwise ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
}

/// Body of a scrape response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrapeResponse {
    /// The scrape ran; the report itself says whether the page was scraped
    Success { success: bool, data: Box<ScrapingReport> },
    /// The request was rejected before any scraping
    Error { error: String, details: String },
}

impl ScrapeResponse {
    fn success(report: ScrapingReport) -> Self {
        Self::Success {
            success: true,
            data: Box::new(report),
        }
    }

    fn error(error: &str, details: impl Into<String>) -> Self {
        Self::Error {
            error: error.to_string(),
            details: details.into(),
        }
    }

    /// Returns true for the error shape
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Handles one JSON request body
///
/// An unparsable body or an empty `url` yields the error shape without any
/// network access. Anything else is scraped and answered with the success
/// shape, including scrapes that failed.
pub async fn handle_request(scraper: &Scraper, body: &str) -> ScrapeResponse {
    let request: ScrapeRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Rejected scrape request: {}", e);
            return ScrapeResponse::error("Invalid request body", e.to_string());
        }
    };

    if request.url.trim().is_empty() {
        return ScrapeResponse::error("URL is required", "The request did not include a url");
    }

    tracing::info!(
        "Scrape request for {} (task: {})",
        request.url,
        request.task.as_deref().unwrap_or("none")
    );

    ScrapeResponse::success(scraper.scrape_website(&request.url).await)
}
