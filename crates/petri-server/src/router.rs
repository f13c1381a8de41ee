//! Axum router construction for the Petri server.
//!
//! Assembles the WebSocket route and the read-only REST routes into a
//! single [`Router`] with CORS middleware enabled so browser viewers can
//! be served from a different origin during development.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::session;
use crate::state::AppState;

/// Build the complete Axum router for the Petri server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /ws` -- viewer `WebSocket` sessions
/// - `GET /api/games` -- list game summaries
/// - `GET /api/games/{id}` -- full wire snapshot of one game
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws", get(session::ws_session))
        // REST API
        .route("/api/games", get(handlers::list_games))
        .route("/api/games/{id}", get(handlers::get_game))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
