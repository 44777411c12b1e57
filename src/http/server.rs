//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the registration handler
//! - Wire up middleware (tracing, timeout, CORS response headers)
//! - Bind the server to a listener and serve with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    set_header::SetResponseHeaderLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::handler::register_handler;
use crate::security::SessionRateLimiter;
use crate::webhook::{HttpWebhookSink, WebhookSink};

/// Hard cap on one request, webhook call included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub limiter: Arc<SessionRateLimiter>,
    pub webhook: Arc<dyn WebhookSink>,
}

/// HTTP server for the registration gateway.
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    /// Create a server with the production webhook sink.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let webhook = Arc::new(HttpWebhookSink::new(&config.webhook)?);
        let config = Arc::new(config);
        let limiter = Arc::new(SessionRateLimiter::new(config.rate_limit.clone()));

        Ok(Self::with_state(AppState {
            config,
            limiter,
            webhook,
        }))
    }

    /// Create a server from pre-built state. Tests use this to inject a
    /// fake webhook sink or a limiter on a manual clock.
    pub fn with_state(state: AppState) -> Self {
        Self {
            router: build_router(state),
        }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
///
/// Every response carries the CORS headers the browser form relies on,
/// including error responses produced by the handler.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/{*path}", any(register_handler))
        .route("/", any(register_handler))
        .with_state(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
