//! Item board server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ request id ─▶ trace ─▶ timeout ─▶ body limit ─▶ router
//!                                                                        │
//!                               ┌────────────────────────────────────────┤
//!                               ▼                                        ▼
//!                         GET/POST /                         GET/POST /session
//!                      SharedItemList (lock)            Session cookie (HMAC-signed)
//!                               │                                        │
//!                               └──────────────▶ views ◀─────────────────┘
//!                                                  │
//!     Client Response  ◀───────────────────────────┘  (POST: 303 redirect)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use item_board::lifecycle::startup::{resolve_config, Overrides};
use item_board::observability::{logging, metrics};
use item_board::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "item-board")]
#[command(about = "Shared list vs. per-session list demo server", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on (overrides the config file).
    #[arg(short, long)]
    bind: Option<String>,

    /// Development mode: pretty debug logs.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = resolve_config(
        cli.config.as_deref(),
        Overrides {
            bind_address: cli.bind,
            debug: cli.debug,
        },
    )?;

    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        debug = config.observability.debug,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Address was checked by validation.
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
