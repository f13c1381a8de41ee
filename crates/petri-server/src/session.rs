//! Viewer session lifecycle and command dispatch.
//!
//! Each WebSocket connection runs one session task that selects between
//! the inbound command stream and the bound game's snapshot broadcast.
//! The session state machine is Unbound → Bound: the first `init` (or any
//! command naming an existing game) binds the session; a later command
//! naming a different game rebinds it -- last command wins, there is no
//! explicit unbind.
//!
//! Error discipline follows the server-wide taxonomy: validation failures
//! (malformed frames, unknown games or patterns, out-of-range input) are
//! logged and leave the connection open with no broadcast; socket
//! read/write failures are fatal to this session only and remove it from
//! the registry.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use petri_core::{EngineError, GameState};

use crate::broadcast::broadcast_game;
use crate::protocol::{Command, Envelope, Snapshot};
use crate::registry::{GameHandle, SessionId};
use crate::state::AppState;

/// Upgrade an HTTP request to a WebSocket connection and run the viewer
/// session loop.
///
/// # Route
///
/// `GET /ws`
#[allow(clippy::unused_async)] // Axum handlers must be async.
pub async fn ws_session(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_session(socket, state))
}

/// Drive one viewer connection until it closes or fails.
async fn handle_session(mut socket: WebSocket, state: Arc<AppState>) {
    let session_id = state.registry.add_session();
    info!(%session_id, "viewer connected");

    let mut bound_game_id: Option<String> = None;
    let mut subscription: Option<broadcast::Receiver<Snapshot>> = None;

    loop {
        tokio::select! {
            // Inbound command frame (or connection end).
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        dispatch_frame(
                            &state,
                            session_id,
                            &mut bound_game_id,
                            &mut subscription,
                            text.as_str(),
                        );
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!(%session_id, "viewer disconnected (pong failed)");
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(%session_id, "viewer closed connection");
                        break;
                    }
                    Some(Ok(_)) => {
                        // Ignore binary and pong frames.
                    }
                    Some(Err(e)) => {
                        debug!(%session_id, error = %e, "read error");
                        break;
                    }
                }
            }
            // Snapshot from the bound game's broadcast channel.
            result = recv_snapshot(&mut subscription), if subscription.is_some() => {
                match result {
                    Ok(snapshot) => {
                        let json = match serde_json::to_string(&snapshot) {
                            Ok(json) => json,
                            Err(e) => {
                                warn!(%session_id, error = %e, "failed to serialize snapshot");
                                continue;
                            }
                        };
                        if socket.send(Message::Text(json.into())).await.is_err() {
                            debug!(%session_id, "viewer disconnected (send failed)");
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!(%session_id, skipped, "viewer lagged, skipping to newest snapshot");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        // Games are never removed, so this only happens in
                        // teardown paths; drop the subscription and keep
                        // serving commands.
                        subscription = None;
                    }
                }
            }
        }
    }

    state.registry.remove_session(session_id);
    info!(
        %session_id,
        game_id = bound_game_id.as_deref().unwrap_or(""),
        "viewer disconnected"
    );
}

/// Await the next snapshot on the bound subscription.
///
/// Only polled when a subscription exists (select guard); the `None` arm
/// parks forever so a spurious poll can never fabricate a value.
async fn recv_snapshot(
    subscription: &mut Option<broadcast::Receiver<Snapshot>>,
) -> Result<Snapshot, broadcast::error::RecvError> {
    match subscription {
        Some(receiver) => receiver.recv().await,
        None => std::future::pending().await,
    }
}

/// Parse and apply one inbound text frame.
///
/// Rejections log and leave the session binding, the registry, and every
/// game untouched; the connection stays open either way.
fn dispatch_frame(
    state: &AppState,
    session_id: SessionId,
    bound_game_id: &mut Option<String>,
    subscription: &mut Option<broadcast::Receiver<Snapshot>>,
    text: &str,
) {
    let envelope: Envelope = match serde_json::from_str(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(%session_id, error = %e, "malformed command frame");
            return;
        }
    };

    let game = match resolve_game(state, session_id, &envelope) {
        Some(game) => game,
        None => return,
    };

    // Join semantics: any command naming a known game binds the session
    // to it; naming a different game later rebinds (last command wins).
    if bound_game_id.as_deref() != Some(envelope.game_id.as_str()) {
        state.registry.bind_session(session_id, &envelope.game_id);
        *subscription = Some(game.subscribe());
        *bound_game_id = Some(envelope.game_id.clone());
        info!(%session_id, game_id = %envelope.game_id, "session bound to game");
    }

    apply_command(session_id, &envelope.game_id, &game, &envelope.command);
}

/// Resolve the command's target game, creating it for an `init` on an
/// unknown identifier.
fn resolve_game(
    state: &AppState,
    session_id: SessionId,
    envelope: &Envelope,
) -> Option<Arc<GameHandle>> {
    if let Some(game) = state.registry.lookup(&envelope.game_id) {
        return Some(game);
    }

    let Command::Init {
        width,
        height,
        cell_size,
    } = &envelope.command
    else {
        warn!(%session_id, game_id = %envelope.game_id, "command for unknown game");
        return None;
    };
    let (width, height, cell_size) = (*width, *height, *cell_size);

    // Build and seed the new board before touching the registry lock.
    let mut rng = rand::rng();
    let game_state = match GameState::new(
        width,
        height,
        cell_size,
        state.game_config.seed_density_pct,
        &mut rng,
    ) {
        Ok(game_state) => game_state,
        Err(e) => {
            warn!(%session_id, game_id = %envelope.game_id, error = %e, "init rejected");
            return None;
        }
    };

    let (game, created) = state.registry.insert_game(&envelope.game_id, game_state);
    if created {
        info!(
            %session_id,
            game_id = %envelope.game_id,
            width,
            height,
            cell_size,
            "game created"
        );
    }
    Some(game)
}

/// Apply a validated command to its game, broadcasting on success.
fn apply_command(
    session_id: SessionId,
    game_id: &str,
    game: &Arc<GameHandle>,
    command: &Command,
) {
    let result: Result<(), EngineError> = match command {
        // Creation and join are handled during resolution; an init only
        // needs the snapshot pushed out.
        Command::Init { .. } => Ok(()),
        Command::Birth { x, y } => game.with_state(|state| state.birth(*x, *y)).map(|outcome| {
            debug!(game_id, x, y, ?outcome, "birth applied");
        }),
        Command::Stop => {
            game.with_state(GameState::stop);
            info!(game_id, "game stopped by viewer");
            Ok(())
        }
        Command::Resume => {
            game.with_state(GameState::resume);
            info!(game_id, "game resumed by viewer");
            Ok(())
        }
        Command::SetBackgroundColor { color } => {
            game.with_state(|state| state.set_background_color(color.clone()));
            debug!(game_id, color, "background color changed");
            Ok(())
        }
        Command::Clear => {
            game.with_state(GameState::clear);
            info!(game_id, "board cleared");
            Ok(())
        }
        Command::RandomBirth { percentage } => game
            .with_state(|state| {
                let mut rng = rand::rng();
                state.seed_random(*percentage, &mut rng)
            })
            .map(|seeded| {
                info!(game_id, percentage, seeded, "random birth applied");
            }),
        Command::Pattern { pattern } => game
            .with_state(|state| {
                let mut rng = rand::rng();
                state.stamp_pattern(pattern, &mut rng)
            })
            .map(|placement| {
                info!(
                    game_id,
                    pattern,
                    x = placement.x,
                    y = placement.y,
                    scale = placement.scale,
                    "pattern stamped"
                );
            }),
    };

    match result {
        Ok(()) => {
            broadcast_game(game_id, game);
        }
        Err(e) => {
            warn!(%session_id, game_id, error = %e, "command rejected");
        }
    }
}
