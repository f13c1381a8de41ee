//! Core simulation for Petri: cellular-automaton boards and games.
//!
//! This crate holds the pure, synchronous half of the system. It knows
//! nothing about sockets, channels, or serialization formats -- it only
//! implements the board, the transition rule, and the mutation primitives
//! the server exposes to viewers.
//!
//! # Architecture
//!
//! - [`cell`] -- The [`Cell`] record (alive flag + cached neighbor count)
//!   and its single-byte wire encoding.
//! - [`board`] -- The [`Board`] grid with incrementally maintained
//!   neighbor counts: birth, generation update, clear, random seeding,
//!   pattern stamping.
//! - [`patterns`] -- The static name → seed-matrix table with per-pattern
//!   scale rules.
//! - [`game`] -- [`GameState`]: one simulation instance with its display
//!   metadata, stopped flag, and generation counter.
//! - [`error`] -- Typed rejections ([`EngineError`]). Every mutation is
//!   validated up front; once validated it is total over its domain.
//!
//! # Neighbor-Count Invariant
//!
//! Outside of an in-progress mutation, every cell's cached neighbor count
//! equals the number of its 8 grid-adjacent cells that are alive. All
//! mutations maintain the invariant incrementally; nothing ever recounts
//! neighbors from scratch.

pub mod board;
pub mod cell;
pub mod error;
pub mod game;
pub mod patterns;

// Re-export primary types for convenience.
pub use board::{Board, BirthOutcome, Placement, MAX_DIMENSION, MIN_DIMENSION};
pub use cell::{Cell, ALIVE_OFFSET};
pub use error::EngineError;
pub use game::GameState;
