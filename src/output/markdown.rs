//! Markdown summary generation
//!
//! This module generates human-readable markdown summaries of a batch,
//! including aggregate scores, common issues, and a per-URL table.

use crate::output::stats::BatchSummary;
use crate::output::traits::{OutputHandler, OutputResult};
use crate::report::ScrapingReport;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Writes the Markdown summary of a batch to a file
#[derive(Debug, Clone)]
pub struct MarkdownOutputHandler {
    path: PathBuf,
}

impl MarkdownOutputHandler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for MarkdownOutputHandler {
    fn write_reports(&self, reports: &[ScrapingReport], summary: &BatchSummary) -> OutputResult<()> {
        let markdown = format_markdown_summary(reports, summary);

        let mut file = File::create(&self.path)?;
        file.write_all(markdown.as_bytes())?;

        tracing::info!("Wrote summary to {}", self.path.display());
        Ok(())
    }
}

/// Formats a batch as markdown
///
/// # Arguments
///
/// * `reports` - The reports in input order
/// * `summary` - The aggregate summary over `reports`
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_summary(reports: &[ScrapingReport], summary: &BatchSummary) -> String {
    let mut md = String::new();

    md.push_str("# Sumi-Lens Scrape Summary\n\n");

    md.push_str("## Overview\n\n");
    md.push_str(&format!("- **Total URLs**: {}\n", summary.total_urls));
    md.push_str(&format!("- **Successful**: {}\n", summary.successful));
    md.push_str(&format!("- **Failed**: {}\n", summary.failed));
    md.push_str(&format!(
        "- **Average SEO Score**: {:.1}\n",
        summary.average_seo_score
    ));
    md.push_str(&format!(
        "- **Average Accessibility Score**: {:.1}\n",
        summary.average_accessibility_score
    ));
    md.push_str(&format!(
        "- **Overall Quality**: {}\n",
        summary.overall_quality
    ));
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    if !summary.common_issues.is_empty() {
        md.push_str("## Common Issues\n\n");
        md.push_str("| Issue | Pages |\n");
        md.push_str("|-------|-------|\n");
        for issue in &summary.common_issues {
            md.push_str(&format!("| {} | {} |\n", escape_cell(&issue.issue), issue.count));
        }
        md.push('\n');
    }

    if !reports.is_empty() {
        md.push_str("## Pages\n\n");
        md.push_str("| URL | Status | Quality | SEO | Accessibility | Notes |\n");
        md.push_str("|-----|--------|---------|-----|---------------|-------|\n");

        for report in reports {
            let (status, notes) = if report.success {
                ("ok", report.warnings.join("; "))
            } else {
                ("failed", report.errors.join("; "))
            };
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                escape_cell(&report.url),
                status,
                report.summary.content_quality,
                report.summary.seo_score,
                report.summary.accessibility_score,
                escape_cell(&notes)
            ));
        }
        md.push('\n');
    }

    md
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
