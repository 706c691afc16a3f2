//! Batch statistics
//!
//! This module aggregates a list of reports into a [`BatchSummary`] and
//! prints it for the command-line.

use crate::report::{ContentQuality, ScrapingReport};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of issues listed in [`BatchSummary::common_issues`]
pub const TOP_ISSUES: usize = 5;

/// How many successful reports carried an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueFrequency {
    pub issue: String,
    pub count: usize,
}

/// Aggregate summary over a batch of reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Number of reports in the batch
    pub total_urls: usize,

    pub successful: usize,

    pub failed: usize,

    /// Mean SEO score over successful reports, 0 when there are none
    pub average_seo_score: f64,

    /// Mean accessibility score over successful reports, 0 when there are none
    pub average_accessibility_score: f64,

    /// Most frequent technical issues, most frequent first
    pub common_issues: Vec<IssueFrequency>,

    /// Tier of the mean of the two average scores
    pub overall_quality: ContentQuality,

    /// SHA-256 of the configuration file the batch ran with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,
}

/// Aggregates reports into a batch summary
///
/// # Arguments
///
/// * `reports` - The reports to summarize
///
/// # Returns
///
/// A [`BatchSummary`] without a config hash
pub fn generate_report_summary(reports: &[ScrapingReport]) -> BatchSummary {
    let successful: Vec<&ScrapingReport> = reports.iter().filter(|r| r.success).collect();

    let average_seo_score = mean(successful.iter().map(|r| r.summary.seo_score));
    let average_accessibility_score =
        mean(successful.iter().map(|r| r.summary.accessibility_score));

    BatchSummary {
        total_urls: reports.len(),
        successful: successful.len(),
        failed: reports.len() - successful.len(),
        average_seo_score,
        average_accessibility_score,
        common_issues: top_issues(&successful, TOP_ISSUES),
        overall_quality: ContentQuality::from_score(
            (average_seo_score + average_accessibility_score) / 2.0,
        ),
        config_hash: None,
    }
}

/// Aggregates reports and stamps the summary with a config hash
pub fn generate_report_summary_with_hash(
    reports: &[ScrapingReport],
    config_hash: String,
) -> BatchSummary {
    BatchSummary {
        config_hash: Some(config_hash),
        ..generate_report_summary(reports)
    }
}

fn mean(scores: impl Iterator<Item = u8>) -> f64 {
    let (sum, count) = scores.fold((0u64, 0u64), |(sum, count), score| {
        (sum + u64::from(score), count + 1)
    });
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Most frequent technical issues across successful reports
///
/// Ties keep the order in which issues were first seen.
fn top_issues(reports: &[&ScrapingReport], limit: usize) -> Vec<IssueFrequency> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for report in reports {
        for issue in &report.summary.technical_issues {
            let count = counts.entry(issue.as_str()).or_insert(0);
            if *count == 0 {
                first_seen.push(issue.as_str());
            }
            *count += 1;
        }
    }

    let mut issues: Vec<IssueFrequency> = first_seen
        .into_iter()
        .map(|issue| IssueFrequency {
            issue: issue.to_string(),
            count: counts[issue],
        })
        .collect();
    // Stable sort keeps first-seen order among equal counts
    issues.sort_by(|a, b| b.count.cmp(&a.count));
    issues.truncate(limit);
    issues
}

/// Prints batch statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `summary` - The batch summary to display
/// * `reports` - The reports it was computed from
pub fn print_statistics(summary: &BatchSummary, reports: &[ScrapingReport]) {
    println!("=== Scrape Statistics ===\n");

    println!("Overview:");
    println!("  Total URLs: {}", summary.total_urls);
    println!("  Successful: {}", summary.successful);
    println!("  Failed: {}", summary.failed);
    println!("  Average SEO score: {:.1}", summary.average_seo_score);
    println!(
        "  Average accessibility score: {:.1}",
        summary.average_accessibility_score
    );
    println!("  Overall quality: {}", summary.overall_quality);
    println!();

    if !summary.common_issues.is_empty() {
        println!("Common Issues:");
        for issue in &summary.common_issues {
            println!("  {}: {}", issue.issue, issue.count);
        }
        println!();
    }

    let failures: Vec<_> = reports.iter().filter(|r| !r.success).collect();
    if !failures.is_empty() {
        println!("Failures ({}):", failures.len());
        for report in failures {
            println!("  - {}: {}", report.url, report.errors.join("; "));
        }
        println!();
    }

    let success_rate = if summary.total_urls > 0 {
        (summary.successful as f64 / summary.total_urls as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Success Rate: {:.1}% ({} / {} URLs scraped successfully)",
        success_rate, summary.successful, summary.total_urls
    );
}
