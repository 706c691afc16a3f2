//! Batch orchestration tests

use crate::create_test_scraper;
use sumi_lens::config::Config;
use sumi_lens::output::generate_report_summary;
use sumi_lens::Scraper;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_twelve_urls_return_twelve_ordered_reports() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/ok/\d+$"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html lang=\"en\"><head><title>OK</title></head><body><h1>OK</h1></body></html>",
            "text/html",
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/fail/\d+$"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let urls: Vec<String> = (0..12)
        .map(|i| {
            let kind = if i % 3 == 0 { "fail" } else { "ok" };
            format!("{}/{}/{}", mock_server.uri(), kind, i)
        })
        .collect();

    let reports = create_test_scraper().scrape_multiple_websites(&urls).await;

    assert_eq!(reports.len(), 12);
    for (i, (report, url)) in reports.iter().zip(&urls).enumerate() {
        assert_eq!(&report.url, url, "report {} out of order", i);
        assert_eq!(report.success, i % 3 != 0, "report {} has wrong outcome", i);
    }

    let summary = generate_report_summary(&reports);
    assert_eq!(summary.total_urls, 12);
    assert_eq!(summary.successful, 8);
    assert_eq!(summary.failed, 4);
}

#[tokio::test]
async fn test_window_size_one_still_completes() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html><body>x</body></html>", "text/html"),
        )
        .expect(3)
        .mount(&mock_server)
        .await;

    let mut config = Config::default();
    config.batch.window_size = 1;
    let scraper = Scraper::new(config).unwrap();

    let urls: Vec<String> = (0..3).map(|i| format!("{}/{}", mock_server.uri(), i)).collect();
    let reports = scraper.scrape_multiple_websites(&urls).await;

    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|r| r.success));
}

#[tokio::test]
async fn test_empty_batch() {
    let reports = create_test_scraper().scrape_multiple_websites(&[]).await;
    assert!(reports.is_empty());
    assert_eq!(generate_report_summary(&reports).total_urls, 0);
}
