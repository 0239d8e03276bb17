//! Pokémon stat relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                   STAT RELAY                      │
//!   WebSocket frame      │  ┌──────────┐   ┌──────────┐   ┌──────────────┐  │
//!   ─────────────────────┼─▶│   http   │──▶│ protocol │──▶│   routing    │  │
//!                        │  │websocket │   │ envelope │   │ MessageRouter│  │
//!                        │  └──────────┘   └──────────┘   └──────┬───────┘  │
//!                        │                                       │          │
//!                        │                 ┌─────────────────────┼───────┐  │
//!                        │                 ▼                     ▼       ▼  │
//!                        │          ┌────────────┐       ┌──────────┐ stubs │
//!                        │          │   stats    │──────▶│ provider │───────┼──▶ PokeAPI
//!                        │          │  reshaper  │       │  client  │       │
//!                        │          └────────────┘       └──────────┘       │
//!   reply frame          │                                                  │
//!   ◀────────────────────┼── same connection, correlated by requestId       │
//!                        └──────────────────────────────────────────────────┘
//! ```
//!
//! # Environment
//! - `HOST`, `PORT`: listener overrides (defaults `localhost`, `5050`)
//! - `RUST_LOG`: log filter, overrides `observability.log_level`
//!
//! A `.env` file in the working directory is loaded first when present.

use std::path::PathBuf;

use clap::Parser;

use pokestat_relay::config::{self, ConfigError, RelayConfig};
use pokestat_relay::lifecycle::wait_for_signal;
use pokestat_relay::observability::{logging, metrics};
use pokestat_relay::RelayServer;

#[derive(Parser)]
#[command(name = "pokestat-relay")]
#[command(about = "WebSocket relay serving Pokémon stats", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Named configuration (standalone, hosted) used when no file is given
    #[arg(long)]
    preset: Option<String>,

    /// Listen host, overrides config and HOST
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overrides config and PORT
    #[arg(short, long)]
    port: Option<u16>,
}

fn load(args: &Args) -> Result<RelayConfig, ConfigError> {
    let mut config = match (&args.config, &args.preset) {
        (Some(path), _) => config::load_config(path)?,
        (None, Some(name)) => {
            RelayConfig::preset(name).ok_or_else(|| ConfigError::UnknownPreset(name.clone()))?
        }
        (None, None) => RelayConfig::default(),
    };

    config::apply_process_env(&mut config)?;
    if let Some(host) = &args.host {
        config.listener.host = host.clone();
    }
    if let Some(port) = args.port {
        config.listener.port = port;
    }

    config::finalize(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = dotenvy::dotenv();

    let args = Args::parse();
    let config = load(&args)?;

    logging::init_logging(&config.observability);
    tracing::info!("pokestat-relay v{} starting", env!("CARGO_PKG_VERSION"));
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        provider = %config.provider.base_url,
        key_style = config.handlers.key_style.as_str(),
        ev_profile = ?config.handlers.ev_profile,
        "Configuration loaded"
    );

    if let Some(addr) = config.observability.metrics_listener()? {
        if let Err(e) = metrics::init_metrics(addr) {
            tracing::error!(error = %e, "Failed to start metrics endpoint");
        }
    }

    let server = RelayServer::new(config)?;
    let running = server.start().await?;
    tracing::info!(address = %running.local_addr(), "Listening for connections");

    let shutdown = running.shutdown_handle();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    running.wait().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
