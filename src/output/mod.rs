//! Output module for batch summaries and reports
//!
//! This module handles:
//! - Aggregating reports into a batch summary
//! - Writing reports as JSON
//! - Generating markdown summaries
//! - Printing statistics to the terminal

mod json;
mod markdown;
pub mod stats;
mod traits;

pub use json::JsonOutputHandler;
pub use markdown::{format_markdown_summary, MarkdownOutputHandler};
pub use stats::{
    generate_report_summary, generate_report_summary_with_hash, print_statistics, BatchSummary,
    IssueFrequency,
};
pub use traits::{OutputError, OutputHandler, OutputResult};
