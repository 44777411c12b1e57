//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the registration gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Downstream webhook settings.
    pub webhook: WebhookConfig,

    /// Per-session rate limiting settings.
    pub rate_limit: RateLimitConfig,

    /// Submission field validation settings.
    pub validation: ValidationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Include delivery diagnostics in 500 responses.
    pub debug_mode: bool,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Webhook delivery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// URL accepted submissions are forwarded to.
    pub url: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5678/webhook/registration".to_string(),
            connect_timeout_secs: 5,
            timeout_secs: 10,
        }
    }
}

/// Rate limiting configuration (fixed window, per session).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum submissions admitted per window.
    pub max_attempts: u32,

    /// Window length in seconds.
    pub time_window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            time_window_secs: 60,
        }
    }
}

/// Submission validation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum accepted name length.
    pub min_name_length: usize,

    /// Minimum accepted platform length.
    pub min_platform_length: usize,

    /// Disposable email domains that are rejected outright.
    pub temp_email_domains: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_name_length: 2,
            min_platform_length: 2,
            temp_email_domains: vec![
                "tempmail.com".to_string(),
                "guerrillamail.com".to_string(),
                "throwaway.email".to_string(),
                "10minutemail.com".to_string(),
                "mailinator.com".to_string(),
                "maildrop.cc".to_string(),
            ],
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
