//! REST handlers: status page and read-only game queries.
//!
//! The mutating surface is the WebSocket protocol; these endpoints only
//! observe. Handlers resolve game handles through the registry first and
//! take each game's lock only after the registry lock is released.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/games` | List game summaries |
//! | `GET` | `/api/games/{id}` | Full wire snapshot of one game |

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use axum::Json;

use crate::error::ApiError;
use crate::protocol::Snapshot;
use crate::state::AppState;

/// Summary of one game for the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GameSummary {
    /// The game identifier.
    pub id: String,
    /// Board width in cells.
    pub width: usize,
    /// Board height in cells.
    pub height: usize,
    /// Number of generation updates applied so far.
    pub generation: u64,
    /// Current number of live cells.
    pub live_cells: u32,
    /// Whether the scheduler is skipping this game.
    pub stopped: bool,
    /// Number of sessions currently bound to this game.
    pub viewers: usize,
}

/// Serve a minimal HTML page showing server status and API links.
///
/// # Route
///
/// `GET /`
#[allow(clippy::unused_async)] // Axum handlers must be async.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let game_count = state.registry.game_count();
    let session_count = state.registry.session_count();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Petri</title>
    <style>
        body {{
            background: #111;
            color: #ccc;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #7ee787; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #7ee787; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        li::before {{ content: "GET "; color: #7ee787; font-weight: bold; }}
        .status {{ color: #3fb950; font-weight: bold; }}
    </style>
</head>
<body>
    <h1>Petri</h1>
    <p class="subtitle">Cellular-automaton streaming server</p>

    <p>Status: <span class="status">RUNNING</span></p>

    <div>
        <div class="metric">
            <div class="label">Games</div>
            <div class="value">{game_count}</div>
        </div>
        <div class="metric">
            <div class="label">Viewers</div>
            <div class="value">{session_count}</div>
        </div>
    </div>

    <h2>API</h2>
    <ul>
        <li><a href="/api/games">/api/games</a></li>
    </ul>
    <p class="subtitle">Viewers connect over WebSocket at <code>/ws</code>.</p>
</body>
</html>"#
    ))
}

/// List all games with their viewer counts.
///
/// # Route
///
/// `GET /api/games`
#[allow(clippy::unused_async)] // Axum handlers must be async.
pub async fn list_games(State(state): State<Arc<AppState>>) -> Json<Vec<GameSummary>> {
    let games = state.registry.games_with_viewers();
    let summaries = games
        .into_iter()
        .map(|(id, handle, viewers)| {
            handle.with_state(|game| GameSummary {
                id,
                width: game.width(),
                height: game.height(),
                generation: game.generation(),
                live_cells: game.board().live_cells(),
                stopped: game.stopped(),
                viewers,
            })
        })
        .collect();
    Json(summaries)
}

/// Full wire snapshot of one game.
///
/// # Route
///
/// `GET /api/games/{id}`
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] when the identifier is unknown.
#[allow(clippy::unused_async)] // Axum handlers must be async.
pub async fn get_game(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Snapshot>, ApiError> {
    let handle = state
        .registry
        .lookup(&id)
        .ok_or_else(|| ApiError::NotFound(format!("no game with id {id}")))?;
    Ok(Json(handle.with_state(|game| Snapshot::capture(game))))
}
