//! Scrape coordinator - single-page pipeline and batch orchestration
//!
//! This module ties the pipeline stages together:
//! - Validating the raw input
//! - Fetching the page
//! - Extracting content and scoring it
//! - Folding any stage failure into the report
//! - Running URL lists in fixed concurrent windows

use crate::config::Config;
use crate::report::{ScrapingReport, TechnicalInfo};
use crate::scrape::fetcher::{build_http_client, fetch_page};
use crate::scrape::parser::extract_content;
use crate::scrape::scoring::score_content;
use crate::url::{validate_url, UrlValidationResult};
use crate::LensError;
use futures::future::join_all;
use reqwest::Client;
use std::time::Instant;
use url::Url;

/// The scraping engine
///
/// Owns one HTTP client and an immutable configuration. A `Scraper` holds no
/// per-scrape state, so concurrent scrapes can share it by reference.
#[derive(Debug, Clone)]
pub struct Scraper {
    client: Client,
    config: Config,
}

impl Scraper {
    /// Creates a new scraper
    ///
    /// # Arguments
    ///
    /// * `config` - The engine configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Scraper)` - Successfully created scraper
    /// * `Err(LensError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, LensError> {
        let client = build_http_client(&config.fetcher)?;
        Ok(Self { client, config })
    }

    /// Scrapes and scores a single URL
    ///
    /// Never fails: validation, fetch and any other stage failure ends up in
    /// the returned report's `errors` with `success == false`. Invalid input
    /// makes no network call.
    pub async fn scrape_website(&self, input: &str) -> ScrapingReport {
        let started = Instant::now();
        let validation = validate_url(input);

        if !validation.is_valid {
            tracing::warn!("Rejected {:?}: {}", input, validation.errors.join("; "));
            let errors = validation.errors.clone();
            return ScrapingReport::failed(input, validation, errors);
        }

        let outcome = self.run_pipeline(&validation, started).await;
        match outcome {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!("Scrape of {} failed: {}", validation.url, e);
                ScrapingReport::failed(input, validation, vec![e.to_string()])
            }
        }
    }

    async fn run_pipeline(
        &self,
        validation: &UrlValidationResult,
        started: Instant,
    ) -> Result<ScrapingReport, LensError> {
        let url =
            Url::parse(&validation.url).map_err(|e| LensError::Validation(e.to_string()))?;

        tracing::debug!("Fetching {}", url);
        let page = fetch_page(&self.client, &url, &self.config.fetcher).await?;

        let technical = TechnicalInfo {
            status_code: page.status_code,
            response_time: page.response_time_ms,
            content_type: page.content_type.clone(),
            size: page.size,
            charset: page.charset.clone(),
        };
        let load_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let content = extract_content(&page.body, &page.final_url, technical, load_time_ms);
        tracing::debug!(
            "Extracted {} words, {} links from {}",
            content.metadata.word_count,
            content.links.total,
            page.final_url
        );

        let summary = score_content(&content);
        tracing::debug!(
            "Scored {}: quality {}, SEO {}, accessibility {}",
            page.final_url,
            summary.content_quality,
            summary.seo_score,
            summary.accessibility_score
        );

        Ok(ScrapingReport::succeeded(validation.clone(), content, summary))
    }

    /// Scrapes a list of URLs in fixed concurrent windows
    ///
    /// Each window of `batch.window-size` URLs runs concurrently and finishes
    /// before the next one starts. Reports come back in input order, one per
    /// input, and a failing URL never affects its neighbours.
    pub async fn scrape_multiple_websites(&self, urls: &[String]) -> Vec<ScrapingReport> {
        let window_size = self.config.batch.window_size.max(1);
        let windows = batch_windows(urls.len(), window_size);
        tracing::info!(
            "Scraping {} URLs in {} windows of up to {}",
            urls.len(),
            windows.len(),
            window_size
        );

        let mut reports = Vec::with_capacity(urls.len());
        let start_time = Instant::now();

        for (index, window) in urls.chunks(window_size).enumerate() {
            tracing::info!(
                "Window {}/{}: {} URLs",
                index + 1,
                windows.len(),
                window.len()
            );
            let results = join_all(window.iter().map(|url| self.scrape_website(url))).await;
            reports.extend(results);
        }

        let successful = reports.iter().filter(|r| r.success).count();
        tracing::info!(
            "Batch complete: {} succeeded, {} failed in {:.2}s",
            successful,
            reports.len() - successful,
            start_time.elapsed().as_secs_f64()
        );

        reports
    }
}

/// Sizes of the fixed windows a batch of `total` URLs is split into
///
/// ```
/// use sumi_lens::scrape::batch_windows;
///
/// assert_eq!(batch_windows(12, 5), vec![5, 5, 2]);
/// ```
pub fn batch_windows(total: usize, window_size: usize) -> Vec<usize> {
    let window_size = window_size.max(1);
    (0..total)
        .step_by(window_size)
        .map(|start| window_size.min(total - start))
        .collect()
}
