//! Shared application state for the Petri server.
//!
//! [`AppState`] is wrapped in [`Arc`](std::sync::Arc) and injected into
//! every handler via Axum's `State` extractor. It owns the registry and
//! the game lifecycle settings sessions need when creating games.

use crate::config::GameConfig;
use crate::registry::Registry;

/// Shared state for the Axum application and the scheduler task.
#[derive(Debug)]
pub struct AppState {
    /// The game and session registry.
    pub registry: Registry,
    /// Game lifecycle settings (seed density, channel capacity).
    pub game_config: GameConfig,
}

impl AppState {
    /// Create application state from game configuration.
    pub fn new(game_config: GameConfig) -> Self {
        Self {
            registry: Registry::new(game_config.broadcast_capacity),
            game_config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
