use crate::config::types::{
    ClassifierConfig, Config, CrawlerConfig, DiscoveryConfig, HttpConfig, ServerConfig,
};
use crate::ConfigError;
use std::net::SocketAddr;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    validate_discovery_config(&config.discovery)?;
    validate_classifier_config(&config.classifier)?;
    validate_server_config(&config.server)?;
    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_workers < 1 || config.max_workers > 100 {
        return Err(ConfigError::Validation(format!(
            "max_workers must be between 1 and 100, got {}",
            config.max_workers
        )));
    }

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 || config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be between 1 and timeout_secs ({}), got {}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    Ok(())
}

fn validate_discovery_config(config: &DiscoveryConfig) -> Result<(), ConfigError> {
    if config.scheme != "https" && config.scheme != "http" {
        return Err(ConfigError::Validation(format!(
            "scheme must be \"https\" or \"http\", got \"{}\"",
            config.scheme
        )));
    }

    if config.sitemap_paths.is_empty() {
        return Err(ConfigError::Validation(
            "sitemap_paths must contain at least one path".to_string(),
        ));
    }

    for path in &config.sitemap_paths {
        if !path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "sitemap path '{}' must start with '/'",
                path
            )));
        }
    }

    Ok(())
}

fn validate_classifier_config(config: &ClassifierConfig) -> Result<(), ConfigError> {
    if config.commerce_indicators.is_empty() {
        return Err(ConfigError::Validation(
            "commerce_indicators must contain at least one phrase".to_string(),
        ));
    }

    for indicator in &config.commerce_indicators {
        if indicator.trim().is_empty() {
            return Err(ConfigError::Validation(
                "commerce indicator cannot be empty".to_string(),
            ));
        }

        // Page text is lower-cased before matching
        if *indicator != indicator.to_lowercase() {
            return Err(ConfigError::Validation(format!(
                "commerce indicator '{}' must be lower-case",
                indicator
            )));
        }
    }

    Ok(())
}

fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!("Invalid bind address '{}': {}", config.bind, e))
    })?;
    Ok(())
}
