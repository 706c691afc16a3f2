//! HTTP fetcher implementation
//!
//! This module handles the single network call of a scrape:
//! - Building the HTTP client with a browser-like header set
//! - One bounded GET request (no retries)
//! - Status, size and Content-Type guards
//! - Error classification into [`FetchError`]

use crate::config::FetcherConfig;
use crate::{ConfigError, FetchError, FetchResult, LensError};
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION, CONTENT_LENGTH,
    CONTENT_TYPE, DNT, UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use reqwest::{redirect::Policy, Client, Response};
use std::time::{Duration, Instant};
use url::Url;

/// Accept header sent with every request
const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Encodings the client can decode
const ACCEPT_ENCODING_VALUE: &str = "gzip, br";

/// Content types treated as HTML
const HTML_CONTENT_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// Maximum redirect hops followed by the client
const MAX_REDIRECTS: usize = 10;

/// A successfully fetched HTML page plus transport metadata
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value
    pub content_type: String,
    /// Charset parameter of the Content-Type, if any
    pub charset: Option<String>,
    /// Page body
    pub body: String,
    /// Body size in bytes
    pub size: u64,
    /// Milliseconds from sending the request until the body was read
    pub response_time_ms: u64,
}

/// Builds an HTTP client with the fixed browser-like header set
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(LensError)` - A configured header value is not a valid header, or
///   the client could not be built
///
/// # Example
///
/// ```no_run
/// use sumi_lens::config::FetcherConfig;
/// use sumi_lens::scrape::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, LensError> {
    Client::builder()
        .default_headers(default_headers(config)?)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(LensError::from)
}

fn default_headers(config: &FetcherConfig) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, header_value("user_agent", &config.user_agent)?);
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(
        ACCEPT_LANGUAGE,
        header_value("accept_language", &config.accept_language)?,
    );
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(ACCEPT_ENCODING_VALUE));
    headers.insert(DNT, HeaderValue::from_static("1"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    Ok(headers)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| {
        ConfigError::Validation(format!("{} is not a valid header value: {}", name, e))
    })
}

/// Fetches a page with a single GET request
///
/// # Request Flow
///
/// | Check | Failure |
/// |-------|---------|
/// | Transport (DNS, connect, TLS) | `Network` |
/// | Timeout (whole request) | `Timeout` |
/// | Non-2xx status | `Http` (`HTTP 404: Not Found`) |
/// | `Content-Length` above ceiling | `TooLarge`, body never read |
/// | Content-Type not HTML | `UnsupportedContentType` |
/// | Body above ceiling (only with `stream_size_guard`) | `TooLarge` |
///
/// Nothing is retried.
pub async fn fetch_page(
    client: &Client,
    url: &Url,
    config: &FetcherConfig,
) -> FetchResult<FetchedPage> {
    let started = Instant::now();

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_error(&e, config))?;

    let status = response.status();
    let final_url = response.url().clone();

    if !status.is_success() {
        return Err(FetchError::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
        });
    }

    if let Some(length) = declared_content_length(&response) {
        if length > config.max_content_length {
            return Err(FetchError::TooLarge {
                size: length,
                limit: config.max_content_length,
            });
        }
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html_content_type(&content_type) {
        let shown = if content_type.is_empty() {
            "none".to_string()
        } else {
            content_type
        };
        return Err(FetchError::UnsupportedContentType(shown));
    }

    let body = if config.stream_size_guard {
        read_body_bounded(response, config).await?
    } else {
        response
            .text()
            .await
            .map_err(|e| classify_error(&e, config))?
    };

    let response_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    tracing::debug!(
        "Fetched {} ({} bytes, {}ms)",
        final_url,
        body.len(),
        response_time_ms
    );

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        charset: parse_charset(&content_type),
        content_type,
        size: body.len() as u64,
        body,
        response_time_ms,
    })
}

/// Reads the body chunk by chunk, aborting once it exceeds the ceiling
async fn read_body_bounded(
    mut response: Response,
    config: &FetcherConfig,
) -> FetchResult<String> {
    let mut buffer: Vec<u8> = Vec::new();

    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| classify_error(&e, config))?
    {
        let size = (buffer.len() + chunk.len()) as u64;
        if size > config.max_content_length {
            return Err(FetchError::TooLarge {
                size,
                limit: config.max_content_length,
            });
        }
        buffer.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn declared_content_length(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

fn classify_error(error: &reqwest::Error, config: &FetcherConfig) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            seconds: config.timeout_secs,
        }
    } else if error.is_connect() {
        FetchError::Network(format!("Connection failed: {}", error))
    } else if error.is_redirect() {
        FetchError::Network(format!("Too many redirects: {}", error))
    } else {
        FetchError::Network(error.to_string())
    }
}

/// Returns true if a Content-Type value names an HTML document
pub fn is_html_content_type(content_type: &str) -> bool {
    let lower = content_type.to_ascii_lowercase();
    HTML_CONTENT_TYPES.iter().any(|t| lower.contains(t))
}

/// Extracts the `charset` parameter from a Content-Type value
pub fn parse_charset(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            let value = value.trim().trim_matches('"');
            (!value.is_empty()).then(|| value.to_lowercase())
        } else {
            None
        }
    })
}
