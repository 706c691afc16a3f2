use crate::config::types::{BatchConfig, Config, FetcherConfig, OutputConfig};
use crate::ConfigError;

/// Upper bound for the request timeout (seconds)
const MAX_TIMEOUT_SECS: u64 = 300;

/// Upper bound for the batch window size
const MAX_WINDOW_SIZE: usize = 100;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_batch_config(&config.batch)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    if config.max_content_length == 0 {
        return Err(ConfigError::Validation(
            "max_content_length must be greater than zero".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.accept_language.trim().is_empty() {
        return Err(ConfigError::Validation(
            "accept_language cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates batch configuration
fn validate_batch_config(config: &BatchConfig) -> Result<(), ConfigError> {
    if config.window_size < 1 || config.window_size > MAX_WINDOW_SIZE {
        return Err(ConfigError::Validation(format!(
            "window_size must be between 1 and {}, got {}",
            MAX_WINDOW_SIZE, config.window_size
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if matches!(&config.report_path, Some(p) if p.is_empty()) {
        return Err(ConfigError::Validation(
            "report_path cannot be empty".to_string(),
        ));
    }

    if matches!(&config.summary_path, Some(p) if p.is_empty()) {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_timeout_bounds() {
        let mut config = FetcherConfig::default();
        config.timeout_secs = 0;
        assert!(validate_fetcher_config(&config).is_err());

        config.timeout_secs = 301;
        assert!(validate_fetcher_config(&config).is_err());

        config.timeout_secs = 300;
        assert!(validate_fetcher_config(&config).is_ok());
    }

    #[test]
    fn test_validate_content_length() {
        let mut config = FetcherConfig::default();
        config.max_content_length = 0;
        assert!(validate_fetcher_config(&config).is_err());
    }

    #[test]
    fn test_validate_user_agent() {
        let mut config = FetcherConfig::default();
        config.user_agent = "   ".to_string();
        assert!(validate_fetcher_config(&config).is_err());
    }

    #[test]
    fn test_validate_window_size() {
        assert!(validate_batch_config(&BatchConfig { window_size: 0 }).is_err());
        assert!(validate_batch_config(&BatchConfig { window_size: 101 }).is_err());
        assert!(validate_batch_config(&BatchConfig { window_size: 1 }).is_ok());
    }

    #[test]
    fn test_validate_output_paths() {
        let config = OutputConfig {
            report_path: Some(String::new()),
            summary_path: None,
        };
        assert!(validate_output_config(&config).is_err());

        let config = OutputConfig {
            report_path: Some("report.json".to_string()),
            summary_path: Some("summary.md".to_string()),
        };
        assert!(validate_output_config(&config).is_ok());
    }
}
