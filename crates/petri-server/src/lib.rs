//! WebSocket streaming server for the Petri simulation.
//!
//! This crate is the transport and orchestration half of the system: it
//! accepts viewer WebSocket connections, dispatches their commands onto
//! [`petri_core`] games, and fans authoritative board snapshots back out.
//!
//! # Architecture
//!
//! - [`registry`] -- The [`Registry`](registry::Registry): gameID → game
//!   handle map plus the live session set, behind one coarse lock. Each
//!   game handle carries the per-game mutation lock and a
//!   [`tokio::sync::broadcast`] channel that acts as that game's session
//!   index.
//! - [`session`] -- One task per viewer connection: an inbound command
//!   loop selected against the bound game's snapshot stream.
//! - [`scheduler`] -- The single sweep loop that ticks every non-stopped
//!   game and triggers a broadcast after each tick.
//! - [`broadcast`] -- Snapshot capture under the game lock plus fan-out
//!   on the game's channel.
//! - [`protocol`] -- The wire types: inbound commands (camelCase, tagged
//!   by `type`) and outbound snapshots (PascalCase, base64 board rows).
//! - [`handlers`] / [`router`] -- Status page and read-only REST queries.
//! - [`config`] / [`server`] -- YAML configuration and the HTTP listener
//!   lifecycle.
//!
//! # Locking Discipline
//!
//! Two tiers: the registry lock guards only map membership; each game's
//! lock guards its board and stopped flag. Neither lock is ever held
//! across an `.await`, the registry lock is never held during a board
//! mutation, and a game lock is never held while taking the registry
//! lock.

pub mod broadcast;
pub mod config;
pub mod error;
pub mod handlers;
pub mod protocol;
pub mod registry;
pub mod router;
pub mod scheduler;
pub mod server;
pub mod session;
pub mod state;

// Re-export primary types for convenience.
pub use config::ServerConfig;
pub use router::build_router;
pub use server::{start_server, ServerError};
pub use state::AppState;
