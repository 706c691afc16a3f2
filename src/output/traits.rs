//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! errors they can produce.

use crate::output::stats::BatchSummary;
use crate::report::ScrapingReport;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output handlers
///
/// An output handler receives the finished batch: every report in input
/// order plus the aggregate summary computed from them.
pub trait OutputHandler {
    /// Writes the reports and their summary
    ///
    /// # Arguments
    ///
    /// * `reports` - One report per scraped URL, in input order
    /// * `summary` - The aggregate summary over `reports`
    fn write_reports(&self, reports: &[ScrapingReport], summary: &BatchSummary)
        -> OutputResult<()>;
}
