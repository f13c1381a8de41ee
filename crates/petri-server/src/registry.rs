//! Game and session registry.
//!
//! The registry owns the two maps the rest of the server works against:
//! gameID → [`GameHandle`] (insertion-only; games live for the process
//! lifetime) and the set of connected sessions with their current game
//! binding. Both sit behind one coarse lock that guards membership only --
//! board mutations always happen under the per-game lock after the
//! registry lock has been released.
//!
//! Each [`GameHandle`] carries a [`tokio::sync::broadcast`] sender for its
//! snapshots. Subscribing a session to that channel is what "bound to a
//! game" means for delivery purposes, so broadcast fan-out never needs to
//! walk the session set.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use uuid::Uuid;

use petri_core::GameState;

use crate::protocol::Snapshot;

/// Identifier for one connected viewer session.
pub type SessionId = Uuid;

/// A registered game: its state behind the mutation lock, plus the
/// snapshot channel every bound session subscribes to.
#[derive(Debug)]
pub struct GameHandle {
    state: Mutex<GameState>,
    tx: broadcast::Sender<Snapshot>,
}

impl GameHandle {
    fn new(state: GameState, broadcast_capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(broadcast_capacity.max(1));
        Self {
            state: Mutex::new(state),
            tx,
        }
    }

    /// Run `f` with the game state locked.
    ///
    /// The lock is a synchronous mutex held only for board work; callers
    /// never hold it across an `.await` and never take the registry lock
    /// inside `f`.
    pub fn with_state<T>(&self, f: impl FnOnce(&mut GameState) -> T) -> T {
        let mut guard = lock_unpoisoned(&self.state);
        f(&mut guard)
    }

    /// Subscribe to this game's snapshot stream.
    pub fn subscribe(&self) -> broadcast::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    /// Publish a snapshot to every subscribed session.
    ///
    /// Returns the number of receivers. Zero receivers is not an error --
    /// it just means no viewer is currently bound to this game.
    pub fn publish(&self, snapshot: Snapshot) -> usize {
        self.tx.send(snapshot).unwrap_or(0)
    }
}

/// Registry bookkeeping for one connected session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct SessionRecord {
    /// The game this session is currently bound to, if any.
    game_id: Option<String>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    games: HashMap<String, Arc<GameHandle>>,
    sessions: HashMap<SessionId, SessionRecord>,
}

/// Shared registry of games and sessions.
///
/// Games are create-if-absent and never removed; sessions come and go
/// with their connections.
#[derive(Debug)]
pub struct Registry {
    inner: Mutex<RegistryInner>,
    broadcast_capacity: usize,
}

impl Registry {
    /// Create an empty registry whose games use the given snapshot
    /// channel capacity.
    pub fn new(broadcast_capacity: usize) -> Self {
        Self {
            inner: Mutex::new(RegistryInner::default()),
            broadcast_capacity,
        }
    }

    /// Resolve a game handle by identifier.
    pub fn lookup(&self, game_id: &str) -> Option<Arc<GameHandle>> {
        lock_unpoisoned(&self.inner).games.get(game_id).cloned()
    }

    /// Insert a freshly built game unless the identifier is already
    /// taken.
    ///
    /// Returns the registered handle and whether this call inserted it.
    /// When two sessions race an `init` for the same identifier, the
    /// loser's state is discarded and the winner's handle is returned --
    /// a game is never recreated.
    pub fn insert_game(&self, game_id: &str, state: GameState) -> (Arc<GameHandle>, bool) {
        let mut inner = lock_unpoisoned(&self.inner);
        if let Some(existing) = inner.games.get(game_id) {
            return (Arc::clone(existing), false);
        }
        let handle = Arc::new(GameHandle::new(state, self.broadcast_capacity));
        inner
            .games
            .insert(game_id.to_owned(), Arc::clone(&handle));
        (handle, true)
    }

    /// Snapshot of all current game identifiers, for a scheduler sweep.
    pub fn game_ids(&self) -> Vec<String> {
        lock_unpoisoned(&self.inner).games.keys().cloned().collect()
    }

    /// Number of registered games.
    pub fn game_count(&self) -> usize {
        lock_unpoisoned(&self.inner).games.len()
    }

    /// All games with their identifiers and current viewer counts.
    ///
    /// Callers inspect the handles after this returns, so no game lock is
    /// ever taken under the registry lock.
    pub fn games_with_viewers(&self) -> Vec<(String, Arc<GameHandle>, usize)> {
        let inner = lock_unpoisoned(&self.inner);
        let mut games: Vec<(String, Arc<GameHandle>, usize)> = inner
            .games
            .iter()
            .map(|(id, handle)| {
                let viewers = inner
                    .sessions
                    .values()
                    .filter(|record| record.game_id.as_deref() == Some(id.as_str()))
                    .count();
                (id.clone(), Arc::clone(handle), viewers)
            })
            .collect();
        games.sort_by(|a, b| a.0.cmp(&b.0));
        games
    }

    /// Register a new, unbound session. Returns its identifier.
    pub fn add_session(&self) -> SessionId {
        let id = Uuid::new_v4();
        lock_unpoisoned(&self.inner)
            .sessions
            .insert(id, SessionRecord::default());
        id
    }

    /// Bind a session to a game (rebinding away from any previous game).
    pub fn bind_session(&self, session: SessionId, game_id: &str) {
        if let Some(record) = lock_unpoisoned(&self.inner).sessions.get_mut(&session) {
            record.game_id = Some(game_id.to_owned());
        }
    }

    /// Remove a session on disconnect.
    pub fn remove_session(&self, session: SessionId) {
        lock_unpoisoned(&self.inner).sessions.remove(&session);
    }

    /// Number of connected sessions.
    pub fn session_count(&self) -> usize {
        lock_unpoisoned(&self.inner).sessions.len()
    }

    /// Number of sessions currently bound to the given game.
    pub fn viewer_count(&self, game_id: &str) -> usize {
        lock_unpoisoned(&self.inner)
            .sessions
            .values()
            .filter(|record| record.game_id.as_deref() == Some(game_id))
            .count()
    }
}

/// Lock a mutex, recovering from poisoning.
///
/// A poisoned lock means some task panicked mid-critical-section; the
/// registry and game maps stay structurally valid, so the server keeps
/// serving with the inner value rather than cascading the failure.
fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;

    fn empty_state() -> GameState {
        let mut rng = SmallRng::seed_from_u64(0);
        GameState::new(10, 10, 10, 0, &mut rng).unwrap()
    }

    #[test]
    fn insert_game_is_create_if_absent() {
        let registry = Registry::new(16);
        let (first, inserted) = registry.insert_game("alpha", empty_state());
        assert!(inserted);

        let (second, inserted) = registry.insert_game("alpha", empty_state());
        assert!(!inserted);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.game_count(), 1);
    }

    #[test]
    fn lookup_resolves_registered_games_only() {
        let registry = Registry::new(16);
        assert!(registry.lookup("alpha").is_none());

        registry.insert_game("alpha", empty_state());
        assert!(registry.lookup("alpha").is_some());
        assert!(registry.lookup("beta").is_none());
    }

    #[test]
    fn game_ids_snapshot_covers_all_games() {
        let registry = Registry::new(16);
        registry.insert_game("alpha", empty_state());
        registry.insert_game("beta", empty_state());

        let mut ids = registry.game_ids();
        ids.sort();
        assert_eq!(ids, vec!["alpha", "beta"]);
    }

    #[test]
    fn session_lifecycle_add_bind_remove() {
        let registry = Registry::new(16);
        registry.insert_game("alpha", empty_state());

        let session = registry.add_session();
        assert_eq!(registry.session_count(), 1);
        assert_eq!(registry.viewer_count("alpha"), 0);

        registry.bind_session(session, "alpha");
        assert_eq!(registry.viewer_count("alpha"), 1);

        registry.bind_session(session, "beta");
        assert_eq!(registry.viewer_count("alpha"), 0);
        assert_eq!(registry.viewer_count("beta"), 1);

        registry.remove_session(session);
        assert_eq!(registry.session_count(), 0);
        assert_eq!(registry.viewer_count("beta"), 0);
    }

    #[test]
    fn with_state_serializes_concurrent_births() {
        let registry = Registry::new(16);
        let (handle, _) = registry.insert_game("alpha", empty_state());

        let left = Arc::clone(&handle);
        let right = Arc::clone(&handle);
        let t1 = std::thread::spawn(move || left.with_state(|game| game.birth(2, 2)));
        let t2 = std::thread::spawn(move || right.with_state(|game| game.birth(6, 6)));
        t1.join().unwrap().unwrap();
        t2.join().unwrap().unwrap();

        handle.with_state(|game| {
            assert!(game.board().cell(2, 2).unwrap().alive);
            assert!(game.board().cell(6, 6).unwrap().alive);
            assert_eq!(game.board().live_cells(), 2);
        });
    }

    #[test]
    fn publish_without_subscribers_reports_zero() {
        let registry = Registry::new(16);
        let (handle, _) = registry.insert_game("alpha", empty_state());
        let snapshot = handle.with_state(|game| crate::protocol::Snapshot::capture(game));
        assert_eq!(handle.publish(snapshot), 0);
    }

    #[test]
    fn subscribers_receive_published_snapshots() {
        let registry = Registry::new(16);
        let (handle, _) = registry.insert_game("alpha", empty_state());

        let mut rx = handle.subscribe();
        let snapshot = handle.with_state(|game| crate::protocol::Snapshot::capture(game));
        assert_eq!(handle.publish(snapshot.clone()), 1);
        assert_eq!(rx.try_recv().unwrap(), snapshot);
    }
}
