use crate::config::types::{Config, FetcherConfig, OutputConfig, SourceConfig};
use crate::ConfigError;
use std::collections::HashSet;
use std::path::Path;
use url::Url;

/// Longest request timeout accepted (seconds)
const MAX_TIMEOUT_SECS: u64 = 300;

/// Longest pause between requests accepted (milliseconds)
const MAX_REQUEST_DELAY_MS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the listing URL, category selection and lecture batch file
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.listing_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid listing-url '{}': {}", config.listing_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "listing-url '{}' must use http or https",
            config.listing_url
        )));
    }

    if config.categories.is_empty() {
        return Err(ConfigError::Validation(
            "categories must name at least one lecture category".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for category in &config.categories {
        if !seen.insert(category) {
            return Err(ConfigError::Validation(format!(
                "category '{}' is listed more than once",
                category
            )));
        }
    }

    if let Some(path) = &config.lectures_file {
        if !Path::new(path).is_file() {
            return Err(ConfigError::Validation(format!(
                "lectures-file '{}' does not exist or is not a file",
                path
            )));
        }
    }

    Ok(())
}

/// Validates HTTP client settings
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    if config.request_delay_ms > MAX_REQUEST_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "request-delay-ms must be <= {}ms, got {}ms",
            MAX_REQUEST_DELAY_MS, config.request_delay_ms
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    if config.summary_path.is_empty() {
        return Err(ConfigError::Validation(
            "summary-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
