//! Company Financial Data API
//!
//! Read-only REST service over company data loaded from CSV files at startup.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │              COMPANY DATA API                │
//!                      │                                              │
//!   data root (CSV) ───┼─▶ store::loader ─▶ DataStore (Arc, frozen)   │
//!                      │                          │                   │
//!   Client Request     │  ┌─────────┐    ┌────────▼───────┐           │
//!   ───────────────────┼─▶│   net   │───▶│ http handlers  │           │
//!                      │  │listener │    │ + param checks │           │
//!                      │  └─────────┘    └────────┬───────┘           │
//!                      │                          ▼                   │
//!   Client Response    │                 ┌────────────────┐           │
//!   ◀──────────────────┼─────────────────│  query layer   │           │
//!                      │                 └────────────────┘           │
//!                      │                                              │
//!                      │  config · observability · lifecycle          │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use company_data_api::config::{self, ServiceConfig};
use company_data_api::lifecycle::{self, Shutdown};
use company_data_api::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "company-data-api")]
#[command(about = "Serve company financial data over a read-only REST API", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `data.root`.
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

fn load_config(cli: &Cli) -> Result<ServiceConfig, config::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ServiceConfig::default(),
    };

    if let Some(dir) = &cli.data_dir {
        config.data.root = dir.clone();
    }
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }

    config::validate_config(&config).map_err(config::ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    logging::init_logging(&config.observability)?;

    tracing::info!("company-data-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        data_root = %config.data.root.display(),
        tls = config.listener.tls.is_some(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let server = lifecycle::build_server(config);

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();
    lifecycle::serve(server, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
