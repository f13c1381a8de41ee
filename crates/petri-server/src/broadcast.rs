//! Snapshot broadcasting.
//!
//! One function: capture a wire snapshot under the game's lock and
//! publish it on the game's channel. Every session bound to the game
//! forwards the snapshot to its own socket independently, so a slow or
//! failing session never blocks the others -- the per-game channel is
//! the session index the fan-out walks instead of the registry.

use tracing::debug;

use crate::protocol::Snapshot;
use crate::registry::GameHandle;

/// Serialize the game under its lock and publish to every bound session.
///
/// Returns the number of sessions that will receive the snapshot.
pub fn broadcast_game(game_id: &str, game: &GameHandle) -> usize {
    let snapshot = game.with_state(|state| Snapshot::capture(state));
    let receivers = game.publish(snapshot);
    debug!(game_id, receivers, "broadcast snapshot");
    receivers
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use tokio::sync::broadcast::error::TryRecvError;

    use petri_core::GameState;

    use super::*;
    use crate::registry::Registry;

    fn empty_state() -> GameState {
        let mut rng = SmallRng::seed_from_u64(0);
        GameState::new(8, 8, 10, 0, &mut rng).unwrap()
    }

    #[test]
    fn broadcast_reaches_only_the_target_games_subscribers() {
        let registry = Registry::new(16);
        let (alpha, _) = registry.insert_game("alpha", empty_state());
        let (beta, _) = registry.insert_game("beta", empty_state());

        let mut alpha_rx = alpha.subscribe();
        let mut beta_rx = beta.subscribe();

        // A session subscribed to "alpha" must never observe "beta"
        // snapshots: the channels are disjoint by construction.
        assert_eq!(broadcast_game("beta", &beta), 1);
        assert_eq!(alpha_rx.try_recv().unwrap_err(), TryRecvError::Empty);
        assert!(beta_rx.try_recv().is_ok());

        assert_eq!(broadcast_game("alpha", &alpha), 1);
        assert!(alpha_rx.try_recv().is_ok());
    }

    #[test]
    fn snapshot_reflects_state_at_capture_time() {
        let registry = Registry::new(16);
        let (game, _) = registry.insert_game("alpha", empty_state());
        let mut rx = game.subscribe();

        game.with_state(|state| state.birth(3, 3)).unwrap();
        broadcast_game("alpha", &game);

        let snapshot = rx.try_recv().unwrap();
        assert_eq!(snapshot.width, 8);
        assert!(!snapshot.stopped);
        // One alive cell somewhere in the encoded rows.
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine as _;
        let alive: usize = snapshot
            .board
            .iter()
            .map(|row| {
                STANDARD
                    .decode(row)
                    .unwrap()
                    .iter()
                    .filter(|&&value| value >= 100)
                    .count()
            })
            .sum();
        assert_eq!(alive, 1);
    }
}
