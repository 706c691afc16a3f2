//! Single-page pipeline tests

use crate::create_test_scraper;
use sumi_lens::api::{handle_request, ScrapeResponse};
use sumi_lens::ContentQuality;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTICLE_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>Field Notes on Ink Wash Painting</title>
    <meta name="description" content="A short guide to sumi-e brushwork.">
    <meta name="author" content="A. Painter">
    <meta property="og:title" content="Field Notes">
    <meta name="twitter:card" content="summary">
    <script src="https://cdn.jsdelivr.net/npm/app.js"></script>
</head>
<body>
    <nav><a href="/menu">Menu</a></nav>
    <article>
        <h1>Field Notes</h1>
        <p>Ink wash painting rewards patience and restraint.</p>
        <p>See <a href="/about">about</a> and <a href="https://other.org/ref">a reference</a>.</p>
        <img src="/brush.png" alt="A brush" loading="lazy">
        <ul><li>Grind the ink</li></ul>
    </article>
    <footer>Copyright notice</footer>
</body>
</html>"#;

#[tokio::test]
async fn test_full_page_report() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(ARTICLE_PAGE, "text/html; charset=UTF-8"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/notes", mock_server.uri());
    let report = create_test_scraper().scrape_website(&url).await;

    assert!(report.success, "errors: {:?}", report.errors);
    assert!(report.errors.is_empty());
    assert!(report.validation_result.is_valid);

    let content = report.content.expect("successful report has content");
    assert_eq!(content.title, "Field Notes on Ink Wash Painting");
    assert_eq!(
        content.description.as_deref(),
        Some("A short guide to sumi-e brushwork.")
    );
    assert_eq!(content.metadata.author.as_deref(), Some("A. Painter"));
    assert_eq!(content.metadata.language.as_deref(), Some("en"));
    assert!(!content.content.contains("Copyright"));
    assert!(!content.content.contains("Menu"));

    let base = mock_server.uri();
    assert_eq!(content.links.internal, vec![format!("{}/about", base)]);
    assert_eq!(content.links.external, vec!["https://other.org/ref"]);
    assert_eq!(content.links.total, 2);

    assert_eq!(content.images.len(), 1);
    assert_eq!(content.images[0].src, format!("{}/brush.png", base));
    assert_eq!(content.social.open_graph["og:title"], "Field Notes");
    assert_eq!(content.structure.headings.h1, vec!["Field Notes"]);
    assert_eq!(content.structure.lists, 1);

    assert_eq!(content.technical.status_code, 200);
    assert_eq!(content.technical.charset.as_deref(), Some("utf-8"));
    assert_eq!(content.technical.size, ARTICLE_PAGE.len() as u64);
    assert!(content.performance.has_cdn);
    assert!(content.performance.has_lazy_loading);

    assert_eq!(report.summary.seo_score, 100);
    assert_eq!(report.summary.accessibility_score, 100);
    assert_eq!(report.summary.content_quality, ContentQuality::Poor);
}

#[tokio::test]
async fn test_not_found_page() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let report = create_test_scraper()
        .scrape_website(&format!("{}/missing", mock_server.uri()))
        .await;

    assert!(!report.success);
    assert_eq!(report.errors, vec!["HTTP 404: Not Found"]);
    assert!(report.content.is_none());
}

#[tokio::test]
async fn test_rejected_input_never_hits_network() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html><body>ok</body></html>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let authority = mock_server.address().to_string();
    let inputs = [
        String::new(),
        "   ".to_string(),
        format!("ftp://{}/page", authority),
        format!("{}:99999/page", mock_server.uri()),
        format!("http://[{}/page", authority),
    ];

    let scraper = create_test_scraper();
    for input in &inputs {
        let report = scraper.scrape_website(input).await;
        assert!(!report.success, "{:?} should fail", input);
        assert!(!report.validation_result.is_valid);
        assert!(!report.errors.is_empty());
        assert!(report.content.is_none());
    }
    assert!(mock_server.received_requests().await.unwrap().is_empty());

    // The same server answers a valid URL, so the empty log above is meaningful
    let report = scraper
        .scrape_website(&format!("http://{}/page", authority))
        .await;
    assert!(report.success, "errors: {:?}", report.errors);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_non_html_content_is_rejected() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"a":1}"#, "application/json"))
        .mount(&mock_server)
        .await;

    let report = create_test_scraper()
        .scrape_website(&format!("{}/data.json", mock_server.uri()))
        .await;

    assert!(!report.success);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("application/json"));
}

#[tokio::test]
async fn test_browser_user_agent_is_sent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("dnt", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html><body>hi</body></html>", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = create_test_scraper().scrape_website(&mock_server.uri()).await;
    assert!(report.success, "errors: {:?}", report.errors);
}

#[tokio::test]
async fn test_api_request_round_trip() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html lang=\"en\"><body><h1>Hi</h1></body></html>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let scraper = create_test_scraper();
    let body = format!(r#"{{"url":"{}","task":"summarize"}}"#, mock_server.uri());

    match handle_request(&scraper, &body).await {
        ScrapeResponse::Success { success, data } => {
            assert!(success);
            assert!(data.success);
            assert_eq!(data.content.map(|c| c.title), Some("Hi".to_string()));
        }
        other => panic!("expected success shape, got {:?}", other),
    }

    assert!(handle_request(&scraper, "not json").await.is_error());
}
