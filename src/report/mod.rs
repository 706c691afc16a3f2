//! Report types returned by the scraping engine
//!
//! A [`ScrapingReport`] is produced for every URL, whether or not the scrape
//! succeeded. Reports serialize with camelCase keys, which is the shape
//! downstream summarization consumers expect.

mod content;

pub use content::{
    ContentMetadata, Headings, ImageInfo, LinkInventory, PageStructure, PerformanceSignals,
    ScrapedContent, SocialTags, TechnicalInfo, WORDS_PER_MINUTE,
};

use crate::url::UrlValidationResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse four-level quality classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ContentQuality {
    /// Tier for a page's word count (`<100`, `<300`, `<600`, else excellent)
    pub fn from_word_count(word_count: usize) -> Self {
        match word_count {
            0..=99 => Self::Poor,
            100..=299 => Self::Fair,
            300..=599 => Self::Good,
            _ => Self::Excellent,
        }
    }

    /// Tier for a 0-100 score (`<60`, `<75`, `<90`, else excellent)
    pub fn from_score(score: f64) -> Self {
        if score < 60.0 {
            Self::Poor
        } else if score < 75.0 {
            Self::Fair
        } else if score < 90.0 {
            Self::Good
        } else {
            Self::Excellent
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

impl fmt::Display for ContentQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scores and findings for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub content_quality: ContentQuality,
    /// 0-100
    pub seo_score: u8,
    /// 0-100
    pub accessibility_score: u8,
    pub technical_issues: Vec<String>,
    pub recommendations: Vec<String>,
}

impl Default for ReportSummary {
    /// The summary carried by failed reports
    fn default() -> Self {
        Self {
            content_quality: ContentQuality::Poor,
            seo_score: 0,
            accessibility_score: 0,
            technical_issues: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

/// Complete result of analyzing one URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapingReport {
    /// Normalized URL when validation succeeded, otherwise the raw input
    pub url: String,
    pub timestamp: DateTime<Utc>,
    /// True iff the page was fetched and parsed and `content` is present
    pub success: bool,
    pub validation_result: UrlValidationResult,
    pub content: Option<ScrapedContent>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub summary: ReportSummary,
}

impl ScrapingReport {
    /// Builds a successful report
    pub fn succeeded(
        validation: UrlValidationResult,
        content: ScrapedContent,
        summary: ReportSummary,
    ) -> Self {
        Self {
            url: validation.url.clone(),
            timestamp: Utc::now(),
            success: true,
            warnings: validation.warnings.clone(),
            validation_result: validation,
            content: Some(content),
            errors: Vec::new(),
            summary,
        }
    }

    /// Builds a failed report
    ///
    /// An empty `errors` list is replaced with a generic message so that a
    /// failed report never carries zero errors.
    pub fn failed(url: &str, validation: UrlValidationResult, mut errors: Vec<String>) -> Self {
        if errors.is_empty() {
            errors.push("Scrape failed for an unknown reason".to_string());
        }

        let url = if validation.is_valid {
            validation.url.clone()
        } else {
            url.to_string()
        };

        Self {
            url,
            timestamp: Utc::now(),
            success: false,
            warnings: validation.warnings.clone(),
            validation_result: validation,
            content: None,
            errors,
            summary: ReportSummary::default(),
        }
    }
}
