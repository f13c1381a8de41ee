//! Tick scheduler.
//!
//! One task, independent of any session, sweeps the registry forever:
//! every game that exists at sweep start receives exactly one update tick
//! (unless stopped) followed by one broadcast, with a fixed delay between
//! consecutive per-game ticks. The delay sits between games, not between
//! sweeps, so total sweep duration scales with the number of active
//! games. There is no cancellation hook; the loop runs until process
//! exit.
//!
//! The per-game `interval` field each game carries is serialized to
//! viewers but deliberately not consulted here -- the sweep runs on one
//! global cadence (see `DESIGN.md`).

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::broadcast::broadcast_game;
use crate::registry::Registry;
use crate::state::AppState;

/// Run the scheduler loop forever.
pub async fn run(state: Arc<AppState>, tick_delay: Duration) {
    info!(
        tick_delay_ms = u64::try_from(tick_delay.as_millis()).unwrap_or(u64::MAX),
        "scheduler starting"
    );
    loop {
        sweep(&state.registry, tick_delay).await;
    }
}

/// One sweep: tick and broadcast every game captured at sweep start.
///
/// Identifiers are snapshotted first and each one re-resolved as its turn
/// comes, tolerating absence (games are never removed today, but the
/// sweep does not depend on that).
pub async fn sweep(registry: &Registry, tick_delay: Duration) {
    for game_id in registry.game_ids() {
        let Some(game) = registry.lookup(&game_id) else {
            continue;
        };

        let ticked = game.with_state(|state| {
            if state.stopped() {
                None
            } else {
                let live_cells = state.tick();
                Some((live_cells, state.generation(), state.stopped()))
            }
        });

        if let Some((live_cells, generation, stopped)) = ticked {
            broadcast_game(&game_id, &game);
            debug!(game_id, generation, live_cells, "scheduler tick");
            if stopped {
                info!(game_id, generation, "game stopped: no live cells remaining");
            }
        }

        tokio::time::sleep(tick_delay).await;
    }
}
