use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Matches an explicit `scheme://` prefix
static SCHEME_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("valid regex"));

/// Longest hostname DNS allows
const MAX_HOSTNAME_LENGTH: usize = 253;

/// Warning emitted when a scheme-less input is defaulted to HTTPS
pub const PROTOCOL_ADDED_WARNING: &str = "Protocol added, defaulted to HTTPS";

/// Outcome of validating a raw, user-supplied URL string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlValidationResult {
    /// True when `errors` is empty
    pub is_valid: bool,

    /// Normalized absolute URL (the trimmed input when parsing failed)
    ///
    /// A bare origin keeps the form it was given: `example.com` becomes
    /// `https://example.com`, `example.com/` becomes `https://example.com/`.
    pub url: String,

    /// Scheme without the trailing colon, e.g. `https`
    pub protocol: String,

    /// Hostname, lowercase
    pub domain: String,

    pub errors: Vec<String>,

    pub warnings: Vec<String>,
}

/// Validates and normalizes a raw URL string
///
/// # Validation Steps
///
/// 1. Trim the input; prepend `https://` when no `scheme://` prefix is
///    present (with a warning)
/// 2. Parse the URL; a parse failure is an error
/// 3. Reject non-HTTP(S) schemes
/// 4. Reject an empty hostname
/// 5. Warn on `localhost` / `127.0.0.1`
/// 6. Reject hostnames longer than 253 characters
///
/// This never fails: problems are reported through `errors` and `warnings`.
///
/// # Examples
///
/// ```
/// use sumi_lens::url::validate_url;
///
/// let result = validate_url("example.com");
/// assert!(result.is_valid);
/// assert_eq!(result.url, "https://example.com");
/// assert_eq!(result.warnings.len(), 1);
///
/// assert!(!validate_url("").is_valid);
/// ```
pub fn validate_url(input: &str) -> UrlValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return UrlValidationResult {
            is_valid: false,
            url: String::new(),
            protocol: String::new(),
            domain: String::new(),
            errors: vec!["URL cannot be empty".to_string()],
            warnings,
        };
    }

    let candidate = if SCHEME_PREFIX.is_match(trimmed) {
        trimmed.to_string()
    } else {
        warnings.push(PROTOCOL_ADDED_WARNING.to_string());
        format!("https://{}", trimmed)
    };

    let url = match Url::parse(&candidate) {
        Ok(url) => url,
        Err(e) => {
            errors.push(format!("Invalid URL format: {}", e));
            return UrlValidationResult {
                is_valid: false,
                url: candidate,
                protocol: String::new(),
                domain: String::new(),
                errors,
                warnings,
            };
        }
    };

    let protocol = url.scheme().to_string();
    if protocol != "http" && protocol != "https" {
        errors.push(format!(
            "Unsupported protocol: {}. Only HTTP and HTTPS are allowed",
            protocol
        ));
    }

    let domain = url.host_str().unwrap_or_default().to_lowercase();
    if domain.is_empty() {
        errors.push("URL must include a hostname".to_string());
    } else if domain.len() > MAX_HOSTNAME_LENGTH {
        errors.push(format!(
            "Hostname is too long ({} characters, maximum is {})",
            domain.len(),
            MAX_HOSTNAME_LENGTH
        ));
    }

    if domain == "localhost" || domain == "127.0.0.1" {
        warnings.push("Localhost URLs may not be reachable from the scraping host".to_string());
    }

    UrlValidationResult {
        is_valid: errors.is_empty(),
        url: normalized_form(&url, &candidate),
        protocol,
        domain,
        errors,
        warnings,
    }
}

/// Serializes `url`, dropping the root slash the parser adds to a bare origin
fn normalized_form(url: &Url, candidate: &str) -> String {
    let mut normalized = url.to_string();
    let bare_origin = url.path() == "/" && url.query().is_none() && url.fragment().is_none();
    if bare_origin && !candidate.ends_with('/') && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_https_to_bare_domain() {
        let result = validate_url("example.com");
        assert!(result.is_valid);
        assert_eq!(result.url, "https://example.com");
        assert_eq!(result.protocol, "https");
        assert_eq!(result.domain, "example.com");
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("Protocol added")));
    }

    #[test]
    fn test_keeps_explicit_http() {
        let result = validate_url("http://example.com/page");
        assert!(result.is_valid);
        assert_eq!(result.url, "http://example.com/page");
        assert_eq!(result.protocol, "http");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_uppercase_scheme_is_recognized() {
        let result = validate_url("HTTPS://Example.COM/Path");
        assert!(result.is_valid);
        assert!(result.warnings.is_empty());
        assert_eq!(result.domain, "example.com");
    }

    #[test]
    fn test_trims_whitespace() {
        let result = validate_url("   https://example.com  \n");
        assert!(result.is_valid);
        assert_eq!(result.url, "https://example.com");
    }

    #[test]
    fn test_bare_origin_keeps_given_form() {
        assert_eq!(validate_url("example.com").url, "https://example.com");
        assert_eq!(validate_url("example.com/").url, "https://example.com/");
        assert_eq!(validate_url("HTTP://Example.com").url, "http://example.com");
        assert_eq!(validate_url("example.com?q=1").url, "https://example.com/?q=1");
        assert_eq!(validate_url("example.com#top").url, "https://example.com/#top");
        assert_eq!(validate_url("example.com/docs").url, "https://example.com/docs");
        assert_eq!(validate_url("localhost:8080").url, "https://localhost:8080");
    }

    #[test]
    fn test_empty_input_is_invalid() {
        let result = validate_url("");
        assert!(!result.is_valid);
        assert!(!result.errors.is_empty());

        let result = validate_url("   ");
        assert!(!result.is_valid);
    }

    #[test]
    fn test_unparseable_input_is_invalid() {
        for input in ["http://", "https://exa mple.com", "://", "http://[::1"] {
            let result = validate_url(input);
            assert!(!result.is_valid, "expected {:?} to be invalid", input);
            assert!(!result.errors.is_empty());
        }
    }

    #[test]
    fn test_binary_garbage_is_invalid() {
        let result = validate_url("\u{0}\u{1}\u{fffd}<>\u{7f}");
        assert!(!result.is_valid);
        assert!(!result.errors.is_empty());
    }

    #[test]
    fn test_non_http_scheme_is_an_error() {
        let result = validate_url("ftp://example.com/file");
        assert!(!result.is_valid);
        assert_eq!(result.protocol, "ftp");
        assert!(result.errors.iter().any(|e| e.contains("Unsupported protocol")));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scheme_without_slashes_is_treated_as_host() {
        let result = validate_url("javascript:alert(1)");
        assert!(!result.is_valid);
    }

    #[test]
    fn test_localhost_is_a_warning() {
        let result = validate_url("http://localhost:3000");
        assert!(result.is_valid);
        assert!(result.warnings.iter().any(|w| w.contains("Localhost")));

        let result = validate_url("http://127.0.0.1:8080/");
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_hostname_too_long() {
        let label = "a".repeat(60);
        let host = format!("{0}.{0}.{0}.{0}.{0}.com", label);
        assert!(host.len() > 253);

        let result = validate_url(&format!("https://{}", host));
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("too long")));
    }
}
