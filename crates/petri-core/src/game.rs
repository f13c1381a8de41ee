//! One simulation instance: board, display metadata, and run state.
//!
//! A [`GameState`] owns its board for the process lifetime. It carries no
//! lock of its own -- the server wraps it in the per-game mutation lock,
//! so every method here assumes exclusive access.

use rand::Rng;
use tracing::debug;

use crate::board::{Board, BirthOutcome, Placement};
use crate::error::EngineError;
use crate::patterns;

/// Default live-cell color sent to viewers.
pub const DEFAULT_COLOR: &str = "#ccc";

/// Default background color sent to viewers.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#111";

/// Default per-game tick interval in nanoseconds.
///
/// Stored and serialized to viewers, but the scheduler runs on one fixed
/// global delay and never consults it (see `DESIGN.md`).
pub const DEFAULT_INTERVAL_NS: i64 = 1_000_000_000;

/// One running simulation: the board plus display metadata and run state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    cell_size: u32,
    color: String,
    background_color: String,
    interval_ns: i64,
    stopped: bool,
    generation: u64,
}

impl GameState {
    /// Create a game with an interior randomly seeded at `seed_density_pct`
    /// percent.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDimensions`] for out-of-range board
    /// dimensions, or [`EngineError::InvalidPercentage`] if the density
    /// exceeds 100.
    pub fn new(
        width: usize,
        height: usize,
        cell_size: u32,
        seed_density_pct: u8,
        rng: &mut impl Rng,
    ) -> Result<Self, EngineError> {
        let mut board = Board::new(width, height)?;
        let seeded = board.seed_random(seed_density_pct, rng)?;
        debug!(width, height, seeded, "new game board seeded");
        Ok(Self {
            board,
            cell_size,
            color: DEFAULT_COLOR.to_owned(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_owned(),
            interval_ns: DEFAULT_INTERVAL_NS,
            stopped: false,
            generation: 0,
        })
    }

    /// The game's board.
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Board width in cells.
    pub const fn width(&self) -> usize {
        self.board.width()
    }

    /// Board height in cells.
    pub const fn height(&self) -> usize {
        self.board.height()
    }

    /// Viewer-side pixel size of one cell.
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Live-cell color.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Background color.
    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    /// Per-game tick interval in nanoseconds (serialized, not scheduled).
    pub const fn interval_ns(&self) -> i64 {
        self.interval_ns
    }

    /// Whether the scheduler should skip this game.
    pub const fn stopped(&self) -> bool {
        self.stopped
    }

    /// Number of generation updates applied so far.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance one generation. Returns the number of live cells in the
    /// new generation; a result of zero also sets the stopped flag.
    pub fn tick(&mut self) -> u32 {
        let live_cells = self.board.step();
        self.generation = self.generation.saturating_add(1);
        if live_cells == 0 {
            self.stopped = true;
        }
        live_cells
    }

    /// Birth a single interior cell (see [`Board::birth`]).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfBounds`] for coordinates outside the
    /// interior.
    pub fn birth(&mut self, x: usize, y: usize) -> Result<BirthOutcome, EngineError> {
        self.board.birth(x, y)
    }

    /// Halt scheduler ticks for this game.
    pub const fn stop(&mut self) {
        self.stopped = true;
    }

    /// Resume scheduler ticks. A game with no live cells will stop itself
    /// again on its next tick.
    pub const fn resume(&mut self) {
        self.stopped = false;
    }

    /// Replace the viewer background color.
    pub fn set_background_color(&mut self, color: String) {
        self.background_color = color;
    }

    /// Reset the board to all-dead. The stopped flag is untouched; the
    /// next scheduler tick will observe the empty board and stop the game.
    pub fn clear(&mut self) {
        self.board.clear();
    }

    /// Birth each dead interior cell with probability `percentage / 100`
    /// (see [`Board::seed_random`]). Returns the number of cells seeded.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPercentage`] when `percentage > 100`.
    pub fn seed_random(
        &mut self,
        percentage: u8,
        rng: &mut impl Rng,
    ) -> Result<u32, EngineError> {
        self.board.seed_random(percentage, rng)
    }

    /// Resolve a named pattern and stamp it at a random fitting offset
    /// (see [`Board::stamp`]).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownPattern`] for names outside the
    /// table, or [`EngineError::PatternTooLarge`] when the scaled
    /// footprint does not fit this board.
    pub fn stamp_pattern(
        &mut self,
        name: &str,
        rng: &mut impl Rng,
    ) -> Result<Placement, EngineError> {
        let pattern = patterns::lookup(name).ok_or_else(|| EngineError::UnknownPattern {
            name: name.to_owned(),
        })?;
        self.board.stamp(&pattern, rng)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;

    fn empty_game(width: usize, height: usize) -> GameState {
        let mut rng = SmallRng::seed_from_u64(0);
        GameState::new(width, height, 10, 0, &mut rng).unwrap()
    }

    #[test]
    fn new_game_carries_display_defaults() {
        let game = empty_game(10, 10);
        assert_eq!(game.color(), DEFAULT_COLOR);
        assert_eq!(game.background_color(), DEFAULT_BACKGROUND_COLOR);
        assert_eq!(game.interval_ns(), DEFAULT_INTERVAL_NS);
        assert_eq!(game.cell_size(), 10);
        assert!(!game.stopped());
        assert_eq!(game.generation(), 0);
    }

    #[test]
    fn full_density_seeds_the_whole_interior() {
        let mut rng = SmallRng::seed_from_u64(2);
        let game = GameState::new(8, 8, 10, 100, &mut rng).unwrap();
        let interior = u32::try_from(game.board().interior_width() * game.board().interior_height())
            .unwrap();
        assert_eq!(game.board().live_cells(), interior);
    }

    #[test]
    fn invalid_dimensions_propagate() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(matches!(
            GameState::new(1, 10, 10, 20, &mut rng),
            Err(EngineError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn tick_on_empty_board_stops_the_game() {
        let mut game = empty_game(10, 10);
        assert_eq!(game.tick(), 0);
        assert!(game.stopped());
        assert_eq!(game.generation(), 1);
    }

    #[test]
    fn tick_with_survivors_keeps_running() {
        let mut game = empty_game(8, 8);
        // A block is a still life: it survives every tick.
        for (x, y) in [(3, 3), (4, 3), (3, 4), (4, 4)] {
            game.birth(x, y).unwrap();
        }
        assert_eq!(game.tick(), 4);
        assert!(!game.stopped());
    }

    #[test]
    fn stop_and_resume_flip_the_flag() {
        let mut game = empty_game(10, 10);
        game.stop();
        assert!(game.stopped());
        game.resume();
        assert!(!game.stopped());
    }

    #[test]
    fn resumed_extinct_game_stops_itself_next_tick() {
        let mut game = empty_game(10, 10);
        game.tick();
        assert!(game.stopped());

        game.resume();
        game.tick();
        assert!(game.stopped());
    }

    #[test]
    fn clear_leaves_the_stopped_flag_alone() {
        let mut game = empty_game(8, 8);
        game.birth(3, 3).unwrap();
        game.clear();
        assert_eq!(game.board().live_cells(), 0);
        assert!(!game.stopped());
    }

    #[test]
    fn background_color_can_change() {
        let mut game = empty_game(8, 8);
        game.set_background_color("#222".to_owned());
        assert_eq!(game.background_color(), "#222");
    }

    #[test]
    fn unknown_pattern_is_rejected() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut game = empty_game(30, 30);
        let result = game.stamp_pattern("warp_core", &mut rng);
        assert_eq!(
            result,
            Err(EngineError::UnknownPattern {
                name: "warp_core".to_owned()
            })
        );
        assert_eq!(game.board().live_cells(), 0);
    }

    #[test]
    fn known_pattern_stamps_onto_the_board() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut game = empty_game(30, 30);
        game.stamp_pattern("toad", &mut rng).unwrap();
        assert_eq!(game.board().live_cells(), 6);
    }
}
