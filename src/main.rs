//! License Lookup Relay
//!
//! An HTTP relay in front of three government licensing registries.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌────────────────────────────────────────────────┐
//!                     │                 LICENSE RELAY                  │
//!                     │                                                │
//!   Client Request    │  ┌─────────┐   ┌──────────┐   ┌────────────┐   │
//!   ──────────────────┼─▶│  http   │──▶│ handlers │──▶│  lookup    │───┼──▶ Illinois CKAN
//!                     │  │ server  │   │(validate)│   │ illinois   │───┼──▶ Colorado Socrata
//!                     │  └─────────┘   └──────────┘   │ colorado   │───┼──▶ California DCA
//!                     │                               │ california │   │
//!   Client Response   │  ┌──────────┐                 └─────┬──────┘   │
//!   ◀─────────────────┼──│ response │◀──── dates / passthrough┘          │
//!                     │  └──────────┘                                  │
//!                     │                                                │
//!                     │  config · observability · lifecycle            │
//!                     └────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use license_relay::config::{config_warnings, load_config};
use license_relay::observability::{logging, metrics};
use license_relay::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "license-relay", version)]
#[command(about = "HTTP relay for state professional license lookups", long_about = None)]
struct Args {
    /// Optional TOML configuration file. Environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    logging::init(&config.observability);

    tracing::info!("license-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        colorado_token = config.colorado.app_token.is_some(),
        california_auth = config.california.auth.is_some(),
        "Configuration loaded"
    );
    for warning in config_warnings(&config) {
        tracing::warn!(field = %warning.field, "{}", warning.message);
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
