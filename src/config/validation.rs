use crate::config::types::{AnalysisConfig, Config, FetcherConfig};
use crate::ConfigError;

/// Longest single request the fetcher may be configured to wait for
const MAX_REQUEST_TIMEOUT_MS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_analysis_config(&config.analysis, &config.fetcher)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    validate_user_agent("crawler-user-agent", &config.crawler_user_agent)?;
    validate_user_agent("browser-user-agent", &config.browser_user_agent)?;

    if config.request_timeout_ms < 100 || config.request_timeout_ms > MAX_REQUEST_TIMEOUT_MS {
        return Err(ConfigError::Validation(format!(
            "request-timeout-ms must be between 100 and {}, got {}",
            MAX_REQUEST_TIMEOUT_MS, config.request_timeout_ms
        )));
    }

    if config.connect_timeout_ms < 100 || config.connect_timeout_ms > config.request_timeout_ms {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-ms must be between 100 and request-timeout-ms ({}), got {}",
            config.request_timeout_ms, config.connect_timeout_ms
        )));
    }

    Ok(())
}

/// Validates analysis limits against the fetcher settings
fn validate_analysis_config(
    config: &AnalysisConfig,
    fetcher: &FetcherConfig,
) -> Result<(), ConfigError> {
    if config.timeout_ms < fetcher.request_timeout_ms {
        return Err(ConfigError::Validation(format!(
            "analysis timeout-ms ({}) must not be shorter than request-timeout-ms ({})",
            config.timeout_ms, fetcher.request_timeout_ms
        )));
    }

    Ok(())
}

/// User agents are sent verbatim as a header value
fn validate_user_agent(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
    }

    if value.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "{} must not contain control characters",
            key
        )));
    }

    Ok(())
}
