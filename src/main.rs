//! Service bootstrap (v0.1)
//!
//! Loads configuration, builds the configured logger, connects to the
//! key-value store and reports readiness.
//!
//! # Startup Order
//!
//! ```text
//!   config file (optional) + environment
//!        │
//!        ▼
//!   ┌──────────┐     ┌──────────────┐     ┌───────────────┐
//!   │  config  │────▶│ observability│────▶│     store     │────▶ ready
//!   │ validate │     │ logger build │     │ connect + PING│
//!   └──────────┘     └──────────────┘     └───────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use svc_bootstrap::lifecycle::startup;

#[derive(Parser)]
#[command(name = "svc-bootstrap")]
#[command(about = "Build the configured logger and probe the key-value store", long_about = None)]
struct Cli {
    /// TOML configuration file. Without it, defaults and environment are used.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let services = startup::start_from(cli.config.as_deref()).await?;

    services.logger.in_scope(|| {
        tracing::info!(
            store = %services.store.options().address(),
            "svc-bootstrap ready"
        )
    });

    Ok(())
}
