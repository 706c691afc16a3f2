use serde::Deserialize;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default response size ceiling (10 MB)
pub const DEFAULT_MAX_CONTENT_LENGTH: u64 = 10 * 1024 * 1024;

/// Default number of URLs scraped concurrently per batch window
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Browser-like user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default Accept-Language header value
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Main configuration structure for Sumi-Lens
///
/// Every section and key is optional; a missing file section falls back to
/// the defaults above.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// HTTP fetch behavior
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Hard timeout for a single request (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Largest accepted response, checked against `Content-Length` (bytes)
    #[serde(
        rename = "max-content-length",
        default = "default_max_content_length"
    )]
    pub max_content_length: u64,

    /// User-Agent header value
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language header value
    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,

    /// Also enforce the size ceiling while reading the body
    #[serde(rename = "stream-size-guard", default)]
    pub stream_size_guard: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            stream_size_guard: false,
        }
    }
}

/// Batch orchestration configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    /// Number of URLs scraped concurrently before the next window starts
    #[serde(rename = "window-size", default = "default_window_size")]
    pub window_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path to the JSON report file
    #[serde(rename = "report-path")]
    pub report_path: Option<String>,

    /// Path to the markdown summary file
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_content_length() -> u64 {
    DEFAULT_MAX_CONTENT_LENGTH
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_accept_language() -> String {
    DEFAULT_ACCEPT_LANGUAGE.to_string()
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}
