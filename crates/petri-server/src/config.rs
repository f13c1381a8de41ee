//! Configuration loading and typed config structures for the Petri server.
//!
//! The canonical configuration lives in `petri-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure and provides a loader with environment overrides for the
//! listen address.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server configuration (mirrors `petri-config.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Network listener settings.
    #[serde(default)]
    pub listen: ListenConfig,

    /// Game lifecycle settings.
    #[serde(default)]
    pub game: GameConfig,
}

impl ServerConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the listener:
    /// - `PETRI_HOST` overrides `listen.host`
    /// - `PETRI_PORT` overrides `listen.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.listen.apply_env_overrides();
        Ok(config)
    }
}

/// Network listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListenConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ListenConfig {
    /// Apply `PETRI_HOST` / `PETRI_PORT` environment overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("PETRI_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("PETRI_PORT") {
            if let Ok(port) = port.parse() {
                self.port = port;
            }
        }
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Game lifecycle settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Fixed delay between consecutive per-game ticks within a scheduler
    /// sweep, in milliseconds.
    #[serde(default = "default_tick_delay_ms")]
    pub tick_delay_ms: u64,

    /// Interior live-cell density (percent) used when seeding a newly
    /// created game.
    #[serde(default = "default_seed_density_pct")]
    pub seed_density_pct: u8,

    /// Capacity of each game's snapshot broadcast channel. A session
    /// that falls further behind skips to the newest snapshot.
    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_delay_ms: default_tick_delay_ms(),
            seed_density_pct: default_seed_density_pct(),
            broadcast_capacity: default_broadcast_capacity(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}

const fn default_tick_delay_ms() -> u64 {
    500
}

const fn default_seed_density_pct() -> u8 {
    20
}

const fn default_broadcast_capacity() -> usize {
    256
}
