//! Quality scorer
//!
//! Derives the content-quality tier, SEO score, accessibility score and the
//! issue and recommendation lists from an extracted page. Scoring is a pure
//! function of [`ScrapedContent`].

use crate::report::{ContentQuality, ReportSummary, ScrapedContent};

/// Title length above which the SEO score is reduced
pub const MAX_TITLE_CHARS: usize = 60;

/// Description length above which the SEO score is reduced
pub const MAX_DESCRIPTION_CHARS: usize = 160;

/// Server response time above which a technical issue is reported
pub const SLOW_RESPONSE_MS: u64 = 5000;

/// Image count above which missing lazy loading costs accessibility points
const LAZY_LOADING_IMAGE_THRESHOLD: usize = 5;

const MISSING_ALT_PENALTY: i32 = 2;
const MISSING_ALT_CAP: i32 = 15;

/// Ordered, duplicate-free issue and recommendation lists
#[derive(Debug, Default)]
struct Findings {
    issues: Vec<String>,
    recommendations: Vec<String>,
}

impl Findings {
    fn issue(&mut self, issue: impl Into<String>) {
        push_unique(&mut self.issues, issue.into());
    }

    fn recommend(&mut self, recommendation: impl Into<String>) {
        push_unique(&mut self.recommendations, recommendation.into());
    }

    fn both(&mut self, issue: impl Into<String>, recommendation: impl Into<String>) {
        self.issue(issue);
        self.recommend(recommendation);
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

/// Scores an extracted page
///
/// Never fails; degenerate content (no title, no body, no images) still
/// yields a fully populated summary with both scores in `0..=100`.
///
/// # Example
///
/// ```
/// use sumi_lens::report::{ContentQuality, ScrapedContent};
/// use sumi_lens::scrape::score_content;
///
/// let summary = score_content(&ScrapedContent::default());
/// assert_eq!(summary.content_quality, ContentQuality::Poor);
/// assert!(summary.seo_score <= 100);
/// ```
pub fn score_content(content: &ScrapedContent) -> ReportSummary {
    let mut findings = Findings::default();

    let content_quality = assess_content_quality(content, &mut findings);
    let seo_score = score_seo(content, &mut findings);
    let accessibility_score = score_accessibility(content, &mut findings);
    check_technical(content, &mut findings);

    ReportSummary {
        content_quality,
        seo_score: clamp_score(seo_score),
        accessibility_score: clamp_score(accessibility_score),
        technical_issues: findings.issues,
        recommendations: findings.recommendations,
    }
}

fn assess_content_quality(content: &ScrapedContent, findings: &mut Findings) -> ContentQuality {
    let quality = ContentQuality::from_word_count(content.metadata.word_count);

    match quality {
        ContentQuality::Poor => findings.recommend(
            "Add more substantive content; pages under 100 words are considered thin",
        ),
        ContentQuality::Fair => {
            findings.recommend("Expand the content with more detail, aiming for at least 300 words")
        }
        ContentQuality::Good => findings
            .recommend("Consider expanding the content further for more comprehensive coverage"),
        ContentQuality::Excellent => {}
    }

    quality
}

fn score_seo(content: &ScrapedContent, findings: &mut Findings) -> i32 {
    let mut score = 100;

    let title = content.title.trim();
    if title.is_empty() {
        score -= 20;
        findings.both("Missing page title", "Add a descriptive <title> element");
    } else if title.chars().count() > MAX_TITLE_CHARS {
        score -= 10;
        findings.both(
            "Page title is too long",
            format!("Shorten the title to {} characters or fewer", MAX_TITLE_CHARS),
        );
    }

    match content.description.as_deref().map(str::trim) {
        None | Some("") => {
            score -= 15;
            findings.both(
                "Missing meta description",
                "Add a meta description summarizing the page",
            );
        }
        Some(description) if description.chars().count() > MAX_DESCRIPTION_CHARS => {
            score -= 5;
            findings.both(
                "Meta description is too long",
                format!(
                    "Shorten the meta description to {} characters or fewer",
                    MAX_DESCRIPTION_CHARS
                ),
            );
        }
        Some(_) => {}
    }

    match content.structure.headings.h1.len() {
        0 => {
            score -= 15;
            findings.both("Missing H1 heading", "Add a single H1 heading describing the page");
        }
        1 => {}
        _ => {
            score -= 10;
            findings.both("Multiple H1 headings", "Use exactly one H1 heading per page");
        }
    }

    let missing_alt = content.images.iter().filter(|img| img.alt.is_none()).count();
    if missing_alt > 0 {
        let penalty = i32::try_from(missing_alt)
            .unwrap_or(i32::MAX)
            .saturating_mul(MISSING_ALT_PENALTY)
            .min(MISSING_ALT_CAP);
        score -= penalty;
        findings.both(
            "Images missing alt text",
            "Add descriptive alt text to all images",
        );
    }

    score
}

fn score_accessibility(content: &ScrapedContent, findings: &mut Findings) -> i32 {
    let mut score = 100;

    if content.metadata.language.is_none() {
        score -= 10;
        findings.both(
            "Missing language attribute",
            "Declare the page language with a lang attribute on <html>",
        );
    }

    if content.structure.headings.h1.len() > 1 {
        score -= 10;
        findings.both("Multiple H1 headings", "Use exactly one H1 heading per page");
    }

    if content.images.len() > LAZY_LOADING_IMAGE_THRESHOLD && !content.performance.has_lazy_loading
    {
        score -= 5;
        findings.both(
            "Images are not lazy loaded",
            "Use loading=\"lazy\" on below-the-fold images",
        );
    }

    score
}

fn check_technical(content: &ScrapedContent, findings: &mut Findings) {
    let technical = &content.technical;

    if technical.status_code >= 400 {
        findings.issue(format!("HTTP error status: {}", technical.status_code));
    }

    if technical.response_time > SLOW_RESPONSE_MS {
        findings.both("Slow server response time", "Optimize server response time");
    }

    if !content.performance.has_cdn {
        findings.recommend("Consider serving static assets from a CDN");
    }
}

fn clamp_score(score: i32) -> u8 {
    // Always within 0..=100 after the clamp
    score.clamp(0, 100) as u8
}
