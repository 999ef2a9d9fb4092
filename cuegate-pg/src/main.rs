//! Playback gate service (cuegate-pg) - Main entry point
//!
//! Hosts one playback gate in front of an in-memory transport and exposes
//! it over HTTP/SSE.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cuegate_common::config::ConfigResolver;
use cuegate_common::events::EventBus;
use cuegate_pg::api::{self, AppContext};
use cuegate_pg::config::{CliOverrides, Config};
use cuegate_pg::{PlaybackGate, SharedState, TransportEngine};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for cuegate-pg
#[derive(Parser, Debug)]
#[command(name = "cuegate-pg")]
#[command(about = "Multi-reason playback gate service")]
#[command(version)]
struct Args {
    /// Path to TOML config file (CUEGATE_CONFIG is read by the config resolver)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to listen on
    #[arg(long, env = "CUEGATE_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CUEGATE_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CUEGATE_LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = ConfigResolver::new(args.config.clone())
        .resolve()
        .context("Failed to load configuration")?;
    let config = Config::from_sources(
        file_config,
        CliOverrides {
            host: args.host,
            port: args.port,
            log_level: args.log_level,
        },
    )
    .context("Invalid configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting CueGate playback gate v{} on {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.host,
        config.port
    );

    let events = Arc::new(EventBus::new(config.event_capacity));
    let state = Arc::new(SharedState::new(Arc::clone(&events)));
    let engine = Arc::new(TransportEngine::new(Arc::clone(&events)));
    let gate = Arc::new(PlaybackGate::new(engine, state));
    info!("Playback gate initialized");

    api::run(&config, AppContext { gate })
        .await
        .context("Server error")?;

    Ok(())
}
