//! Petri server binary.
//!
//! Wires the registry, scheduler, and HTTP listener together and runs
//! until the process is terminated.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `petri-config.yaml` (defaults if absent)
//! 3. Build shared application state (registry + game settings)
//! 4. Spawn the scheduler task
//! 5. Serve HTTP + `WebSocket` until process exit

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use petri_server::config::{ConfigError, ServerConfig};
use petri_server::{scheduler, start_server, AppState};

/// Application entry point for the Petri server.
///
/// # Errors
///
/// Returns an error if configuration loading or the HTTP listener fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("petri-server starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        host = config.listen.host,
        port = config.listen.port,
        tick_delay_ms = config.game.tick_delay_ms,
        seed_density_pct = config.game.seed_density_pct,
        "configuration loaded"
    );

    // 3. Build shared state.
    let state = Arc::new(AppState::new(config.game.clone()));

    // 4. Spawn the scheduler. It has no cancellation hook; it dies with
    //    the process.
    let tick_delay = Duration::from_millis(config.game.tick_delay_ms);
    tokio::spawn(scheduler::run(Arc::clone(&state), tick_delay));

    // 5. Serve until process exit.
    start_server(&config.listen, state).await?;

    Ok(())
}

/// Load the server configuration from `petri-config.yaml`.
///
/// Looks for the config file relative to the current working directory
/// and falls back to defaults when it does not exist.
fn load_config() -> Result<ServerConfig, ConfigError> {
    let config_path = Path::new("petri-config.yaml");
    if config_path.exists() {
        ServerConfig::from_file(config_path)
    } else {
        info!("config file not found, using defaults");
        Ok(ServerConfig::default())
    }
}
