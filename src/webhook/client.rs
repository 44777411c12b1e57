//! Outbound webhook delivery.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::WebhookConfig;
use crate::registration::WebhookPayload;

/// Result of one delivery attempt.
///
/// `status` is `None` when the request never produced an HTTP response
/// (connect failure, timeout); `error` then carries the transport error.
#[derive(Debug, Clone, Default)]
pub struct DeliveryOutcome {
    pub status: Option<u16>,
    pub body: Option<String>,
    pub error: Option<String>,
}

impl DeliveryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(code) if (200..300).contains(&code))
    }
}

/// Destination for accepted submissions. Object-safe so tests can stand in
/// a recording fake.
#[async_trait]
pub trait WebhookSink: Send + Sync {
    /// Forward one payload. Single attempt; the caller does not retry.
    async fn deliver(&self, payload: &WebhookPayload) -> DeliveryOutcome;
}

/// Production sink: form-encoded POST to the configured URL.
pub struct HttpWebhookSink {
    client: reqwest::Client,
    url: String,
}

impl HttpWebhookSink {
    pub fn new(config: &WebhookConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl WebhookSink for HttpWebhookSink {
    async fn deliver(&self, payload: &WebhookPayload) -> DeliveryOutcome {
        match self.client.post(&self.url).form(payload).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.ok();
                DeliveryOutcome {
                    status: Some(status),
                    body,
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!(url = %self.url, error = %e, "Webhook delivery failed");
                DeliveryOutcome {
                    status: None,
                    body: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
