//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check value ranges (limits >= 1, timeouts > 0)
//! - Check the webhook URL and bind addresses actually parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a loaded configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("webhook.url {0:?} is not a valid http(s) URL")]
    InvalidWebhookUrl(String),

    #[error("webhook.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("rate_limit.max_attempts must be at least 1")]
    ZeroMaxAttempts,

    #[error("rate_limit.time_window_secs must be at least 1")]
    ZeroTimeWindow,

    #[error("validation.{0} must be at least 1")]
    ZeroMinLength(&'static str),

    #[error("observability.metrics_address {0:?} is not a valid socket address")]
    InvalidMetricsAddress(String),
}

/// Check a deserialized configuration for semantic problems.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match Url::parse(&config.webhook.url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        _ => errors.push(ValidationError::InvalidWebhookUrl(config.webhook.url.clone())),
    }

    if config.webhook.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_timeout_secs"));
    }
    if config.webhook.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeout_secs"));
    }

    if config.rate_limit.max_attempts == 0 {
        errors.push(ValidationError::ZeroMaxAttempts);
    }
    if config.rate_limit.time_window_secs == 0 {
        errors.push(ValidationError::ZeroTimeWindow);
    }

    if config.validation.min_name_length == 0 {
        errors.push(ValidationError::ZeroMinLength("min_name_length"));
    }
    if config.validation.min_platform_length == 0 {
        errors.push(ValidationError::ZeroMinLength("min_platform_length"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.webhook.url = "not a url".to_string();
        config.rate_limit.max_attempts = 0;
        config.rate_limit.time_window_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroMaxAttempts));
        assert!(errors.contains(&ValidationError::ZeroTimeWindow));
    }

    #[test]
    fn rejects_non_http_webhook_scheme() {
        let mut config = GatewayConfig::default();
        config.webhook.url = "ftp://example.com/hook".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidWebhookUrl("ftp://example.com/hook".to_string())]
        );
    }
}
