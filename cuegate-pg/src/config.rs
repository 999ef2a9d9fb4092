//! cuegate-pg specific configuration
//!
//! Merges the bootstrap TOML file with command-line overrides.

use crate::error::Result;
use cuegate_common::config::TomlConfig;

/// Values given on the command line (or their environment fallbacks)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Playback gate service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub event_capacity: usize,
}

impl Config {
    /// Apply CLI overrides on top of the loaded file
    pub fn from_sources(file: TomlConfig, cli: CliOverrides) -> Result<Self> {
        let mut merged = file;
        if let Some(host) = cli.host {
            merged.host = host;
        }
        if let Some(port) = cli.port {
            merged.port = port;
        }
        if let Some(level) = cli.log_level {
            merged.logging.level = level;
        }
        merged.validate()?;

        Ok(Self {
            host: merged.host,
            port: merged.port,
            log_level: merged.logging.level.to_lowercase(),
            event_capacity: merged.events.channel_capacity,
        })
    }

    /// Default tracing filter when RUST_LOG is not set
    pub fn log_filter(&self) -> String {
        format!(
            "cuegate_pg={level},cuegate_common={level},tower_http={level}",
            level = self.log_level
        )
    }
}
