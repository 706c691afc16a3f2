//! Structured page model produced by the content extractor

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Words per minute used for the reading time estimate
pub const WORDS_PER_MINUTE: usize = 200;

/// Everything extracted from one HTML page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedContent {
    /// `<title>` text, falling back to the first `<h1>`; empty when neither exists
    pub title: String,

    /// Meta description, falling back to `og:description`
    pub description: Option<String>,

    /// Cleaned main-body text
    pub content: String,

    pub metadata: ContentMetadata,

    pub links: LinkInventory,

    pub images: Vec<ImageInfo>,

    pub social: SocialTags,

    pub technical: TechnicalInfo,

    pub structure: PageStructure,

    pub performance: PerformanceSignals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    pub author: Option<String>,
    pub publish_date: Option<String>,
    pub modified_date: Option<String>,
    pub language: Option<String>,
    pub keywords: Vec<String>,
    pub word_count: usize,
    /// Minutes, `ceil(word_count / 200)`
    pub reading_time: usize,
}

impl ContentMetadata {
    /// Reading time in whole minutes for a word count
    pub fn reading_time_for(word_count: usize) -> usize {
        word_count.div_ceil(WORDS_PER_MINUTE)
    }
}

/// Links found on the page, split by hostname
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkInventory {
    pub internal: Vec<String>,
    pub external: Vec<String>,
    /// Always `internal.len() + external.len()`
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub src: String,
    pub alt: Option<String>,
    pub title: Option<String>,
}

/// OpenGraph and Twitter card meta tags, copied verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialTags {
    pub open_graph: BTreeMap<String, String>,
    pub twitter_card: BTreeMap<String, String>,
}

/// Transport metadata from the fetch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalInfo {
    pub status_code: u16,
    /// Milliseconds until the response body was read
    pub response_time: u64,
    pub content_type: String,
    /// Body size in bytes
    pub size: u64,
    pub charset: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    pub h5: Vec<String>,
    pub h6: Vec<String>,
}

impl Headings {
    /// Mutable access to the list for a heading level (1-6)
    pub fn level_mut(&mut self, level: u8) -> Option<&mut Vec<String>> {
        match level {
            1 => Some(&mut self.h1),
            2 => Some(&mut self.h2),
            3 => Some(&mut self.h3),
            4 => Some(&mut self.h4),
            5 => Some(&mut self.h5),
            6 => Some(&mut self.h6),
            _ => None,
        }
    }
}

/// Heading outline and element counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStructure {
    pub headings: Headings,
    pub paragraphs: usize,
    pub lists: usize,
    pub tables: usize,
    pub forms: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSignals {
    /// Milliseconds from the start of the scrape until extraction
    pub load_time: u64,
    pub resource_count: usize,
    pub has_lazy_loading: bool,
    #[serde(rename = "hasCDN")]
    pub has_cdn: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_time_rounds_up() {
        assert_eq!(ContentMetadata::reading_time_for(0), 0);
        assert_eq!(ContentMetadata::reading_time_for(1), 1);
        assert_eq!(ContentMetadata::reading_time_for(200), 1);
        assert_eq!(ContentMetadata::reading_time_for(201), 2);
        assert_eq!(ContentMetadata::reading_time_for(1000), 5);
    }

    #[test]
    fn test_headings_level_mut() {
        let mut headings = Headings::default();
        headings.level_mut(2).unwrap().push("Intro".to_string());
        assert_eq!(headings.h2, vec!["Intro".to_string()]);
        assert!(headings.level_mut(0).is_none());
        assert!(headings.level_mut(7).is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let content = ScrapedContent::default();
        let json = serde_json::to_value(&content).unwrap();

        assert!(json["metadata"].get("wordCount").is_some());
        assert!(json["metadata"].get("readingTime").is_some());
        assert!(json["social"].get("openGraph").is_some());
        assert!(json["technical"].get("statusCode").is_some());
        assert!(json["performance"].get("hasCDN").is_some());
        assert!(json["performance"].get("hasLazyLoading").is_some());
        assert!(json["structure"]["headings"].get("h1").is_some());
    }
}
