//! Wire protocol: inbound viewer commands and outbound board snapshots.
//!
//! The formats are inherited from the original viewer client and must not
//! drift: inbound frames use camelCase fields with a `type` tag next to
//! `gameID`; outbound snapshots use PascalCase keys and encode each board
//! row as standard base64 of its packed bytes (`value >= 100` is alive,
//! `value % 100` is the neighbor count).

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use petri_core::GameState;

/// One inbound viewer frame: the target game plus the command payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Envelope {
    /// Identifier of the game the command targets.
    #[serde(rename = "gameID")]
    pub game_id: String,

    /// The command payload, tagged by the `type` field.
    #[serde(flatten)]
    pub command: Command,
}

/// Viewer commands, tagged by the wire `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Create the game if unknown, otherwise join it.
    Init {
        /// Board width in cells.
        width: usize,
        /// Board height in cells.
        height: usize,
        /// Viewer-side pixel size of one cell.
        #[serde(rename = "cellSize")]
        cell_size: u32,
    },

    /// Birth one interior cell.
    Birth {
        /// Cell x coordinate.
        x: usize,
        /// Cell y coordinate.
        y: usize,
    },

    /// Halt scheduler ticks for the game.
    Stop,

    /// Resume scheduler ticks for the game.
    Resume,

    /// Change the viewer background color.
    SetBackgroundColor {
        /// The new background color string.
        color: String,
    },

    /// Reset the board to all-dead.
    Clear,

    /// Birth each dead interior cell with the given probability.
    RandomBirth {
        /// Per-cell birth probability in percent (0-100).
        percentage: u8,
    },

    /// Stamp a named seed pattern at a random fitting offset.
    Pattern {
        /// Name from the pattern table.
        pattern: String,
    },
}

/// One outbound board snapshot.
///
/// Serialized with PascalCase keys to match what the viewer client reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Snapshot {
    /// Board rows: standard base64 of each row's packed bytes.
    pub board: Vec<String>,
    /// Board width in cells.
    pub width: usize,
    /// Board height in cells.
    pub height: usize,
    /// Viewer-side pixel size of one cell.
    pub cell_size: u32,
    /// Live-cell color.
    pub color: String,
    /// Background color.
    pub background_color: String,
    /// Per-game tick interval in nanoseconds (serialized, not scheduled).
    pub interval: i64,
    /// Whether the scheduler is skipping this game.
    pub stopped: bool,
}

impl Snapshot {
    /// Capture a wire snapshot of the given game state.
    ///
    /// Callers hold the game lock for the duration, so the snapshot is
    /// always a complete generation, never a half-built board.
    pub fn capture(state: &GameState) -> Self {
        let board = state
            .board()
            .packed_rows()
            .into_iter()
            .map(|row| STANDARD.encode(row))
            .collect();
        Self {
            board,
            width: state.width(),
            height: state.height(),
            cell_size: state.cell_size(),
            color: state.color().to_owned(),
            background_color: state.background_color().to_owned(),
            interval: state.interval_ns(),
            stopped: state.stopped(),
        }
    }
}
