//! Canopy local dev server.
//!
//! ```text
//!                      ┌──────────────────────────────────────────┐
//!                      │               DEV SERVER                 │
//!   Browser            │                                          │
//!   ───────────────────┼─▶ dispatch ──▶ OPTIONS  ──▶ 204 + CORS   │
//!                      │      │                                   │
//!                      │      ├──▶ POST /api/claude ──▶ proxy ────┼──▶ upstream API
//!                      │      │                    (x-api-key)    │    (api.anthropic.com)
//!                      │      ├──▶ POST other ──▶ 404 + CORS      │
//!                      │      │                                   │
//!                      │      └──▶ GET/HEAD ──▶ static files      │
//!                      └──────────────────────────────────────────┘
//! ```
//!
//! Usage:
//! ```text
//! ANTHROPIC_API_KEY=sk-ant-... canopy-dev-server --port 8080 --root .
//! ```

use clap::Parser;
use std::path::PathBuf;

use canopy_dev_server::lifecycle::startup::{self, Overrides};
use canopy_dev_server::observability::init_tracing;

#[derive(Parser)]
#[command(name = "canopy-dev-server")]
#[command(about = "Static file server with an upstream AI proxy route", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "CANOPY_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to bind.
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to listen on (default 8080).
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Directory to serve static files from (default ".").
    #[arg(short, long, env = "CANOPY_ROOT")]
    root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = Overrides {
        config_path: cli.config,
        host: cli.host,
        port: cli.port,
        root: cli.root,
    };

    let config = startup::resolve_config(&overrides)?;
    init_tracing(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.bind_address(),
        upstream = %config.upstream.url,
        "Configuration loaded"
    );

    startup::start(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
