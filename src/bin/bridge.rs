//! Legacy bridge binary.
//!
//! Opens a pooled connection to the legacy yard database and holds it
//! for the lifetime of the process. A failed connection is logged;
//! the process neither retries nor exits, matching the behavior other
//! consumers of the bridge expect.

use breakyard::bridge::LegacyBridge;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "breakyard-bridge")]
#[command(author, version, about = "Legacy database bridge", long_about = None)]
struct Cli {
    /// Data source name of the legacy database (falls back to LEGACY_DSN)
    #[arg(long)]
    dsn: Option<String>,

    /// Maximum pooled connections
    #[arg(long, default_value = "5")]
    max_connections: u32,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "breakyard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let dsn = match cli.dsn.or_else(|| std::env::var("LEGACY_DSN").ok()) {
        Some(dsn) => dsn,
        None => {
            eprintln!("STARTUP_ERROR no legacy DSN configured (--dsn or LEGACY_DSN)");
            std::process::exit(1);
        }
    };

    let bridge = match LegacyBridge::connect(&dsn, cli.max_connections).await {
        Ok(bridge) => Some(bridge),
        Err(e) => {
            error!("failed to connect legacy bridge: {}", e);
            None
        }
    };

    if bridge.is_some() {
        info!("legacy bridge ready");
    }

    // Hold the pool (or the failed state) until the process is stopped.
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", e);
    }

    info!("legacy bridge shutting down");
}
