//! Shared utilities for integration testing.
//!
//! Servers run on ephemeral local ports, the pattern used to exercise the
//! gateway and its downstream webhook without any fixed fixtures.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{extract::State, http::StatusCode, routing::post, Form, Router};
use tokio::net::TcpListener;

use registration_gateway::config::GatewayConfig;
use registration_gateway::http::{build_router, AppState};
use registration_gateway::registration::WebhookPayload;
use registration_gateway::security::SessionRateLimiter;
use registration_gateway::webhook::HttpWebhookSink;

/// Payloads a mock webhook has accepted, shared with the test body.
pub type Received = Arc<Mutex<Vec<WebhookPayload>>>;

#[derive(Clone)]
struct MockWebhookState {
    received: Received,
    status: u16,
}

async fn mock_webhook_handler(
    State(state): State<MockWebhookState>,
    Form(payload): Form<WebhookPayload>,
) -> StatusCode {
    state.received.lock().unwrap().push(payload);
    StatusCode::from_u16(state.status).unwrap()
}

/// Start a mock automation webhook answering every POST with `status`.
/// Returns the webhook URL and the payloads it received.
pub async fn start_mock_webhook(status: u16) -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/webhook/registration", post(mock_webhook_handler))
        .with_state(MockWebhookState {
            received: received.clone(),
            status,
        });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/webhook/registration", addr), received)
}

/// Start a gateway wired to the real reqwest webhook sink.
/// Returns the base URL requests should target.
pub async fn start_gateway(config: GatewayConfig) -> String {
    let webhook = Arc::new(HttpWebhookSink::new(&config.webhook).unwrap());
    let config = Arc::new(config);
    let limiter = Arc::new(SessionRateLimiter::new(config.rate_limit.clone()));

    let app = build_router(AppState {
        config,
        limiter,
        webhook,
    })
    .into_make_service_with_connect_info::<SocketAddr>();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Gateway config pointed at a mock webhook, with test-friendly defaults.
pub fn gateway_config(webhook_url: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.webhook.url = webhook_url.to_string();
    config
}
