//! Bootstrap configuration loading and config file resolution
//!
//! Settings sources, highest priority first:
//! 1. Command-line arguments (applied by the binary on top of the loaded file)
//! 2. Explicit config path (`--config`), then the `CUEGATE_CONFIG` environment variable
//! 3. Platform config file (`~/.config/cuegate/config.toml`, `/etc/cuegate/config.toml`)
//! 4. Compiled defaults
//!
//! A missing implicit config file never aborts startup: a warning is logged
//! and compiled defaults are used.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CUEGATE_CONFIG";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TomlConfig {
    /// Interface the HTTP control surface binds to
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Event bus configuration
    #[serde(default)]
    pub events: EventsConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Event bus configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventsConfig {
    /// Number of events buffered per subscriber before the oldest are dropped
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5750
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_channel_capacity() -> usize {
    100
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logging: LoggingConfig::default(),
            events: EventsConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl TomlConfig {
    /// Parse a TOML config file
    ///
    /// Fields absent from the file take their compiled defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TomlConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the services cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.events.channel_capacity == 0 {
            return Err(Error::Config(
                "events.channel_capacity must be greater than zero".to_string(),
            ));
        }

        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(Error::Config(format!(
                "Unknown log level '{}' (expected trace, debug, info, warn or error)",
                self.logging.level
            )));
        }

        Ok(())
    }
}

/// Locates and loads the bootstrap config file
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    explicit_path: Option<PathBuf>,
}

impl ConfigResolver {
    /// Create a resolver; `explicit_path` is the `--config` argument, if any
    pub fn new(explicit_path: Option<PathBuf>) -> Self {
        Self { explicit_path }
    }

    /// Find the config file to load, if any
    ///
    /// Returns `(path, explicit)`; an explicit path is one the user named via
    /// CLI or environment and must exist.
    pub fn locate(&self) -> Option<(PathBuf, bool)> {
        // Priority 1: Command-line argument
        if let Some(path) = &self.explicit_path {
            return Some((path.clone(), true));
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Some((PathBuf::from(path), true));
            }
        }

        // Priority 3: Platform config locations
        platform_config_paths().into_iter().find(|p| p.exists()).map(|p| (p, false))
    }

    /// Resolve and load the configuration
    ///
    /// An explicit path that does not exist is an error; no implicit file
    /// means compiled defaults.
    pub fn resolve(&self) -> Result<TomlConfig> {
        match self.locate() {
            Some((path, explicit)) => {
                if !path.exists() {
                    if explicit {
                        return Err(Error::Config(format!(
                            "Config file not found: {}",
                            path.display()
                        )));
                    }
                    warn!("Config file {} vanished, using defaults", path.display());
                    return Ok(TomlConfig::default());
                }
                info!("Loading configuration from {}", path.display());
                TomlConfig::from_file(&path)
            }
            None => {
                warn!("No config file found, using compiled defaults");
                Ok(TomlConfig::default())
            }
        }
    }
}

/// Candidate config file locations for the platform, in priority order
fn platform_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("cuegate").join("config.toml"));
    }

    if cfg!(target_os = "linux") {
        paths.push(PathBuf::from("/etc/cuegate/config.toml"));
    }

    paths
}
