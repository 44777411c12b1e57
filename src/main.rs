//! Registration gateway entrypoint.
//!
//! ```text
//!     Client POST {name, email, platform}
//!          │
//!          ▼
//!     ┌──────────┐   ┌───────────┐   ┌────────────┐   ┌─────────┐
//!     │  http    │──▶│ security  │──▶│registration│──▶│ webhook │──▶ automation
//!     │ handler  │   │rate limit │   │  validate  │   │  sink   │    (n8n)
//!     └──────────┘   └───────────┘   └────────────┘   └─────────┘
//!          │
//!          ▼
//!     JSON response (200 / 400 / 405 / 429 / 500)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use registration_gateway::config::{load_config, GatewayConfig};
use registration_gateway::observability::metrics;
use registration_gateway::GatewayServer;

#[derive(Parser)]
#[command(name = "registration-gateway")]
#[command(about = "Seller registration endpoint forwarding to an automation webhook", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Built-in defaults apply when
    /// omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "registration_gateway={},tower_http=warn",
                    config.observability.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("registration-gateway v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        webhook_url = %config.webhook.url,
        max_attempts = config.rate_limit.max_attempts,
        time_window_secs = config.rate_limit.time_window_secs,
        debug_mode = config.debug_mode,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = GatewayServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
