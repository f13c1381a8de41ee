//! Rectangular cell grid with incrementally maintained neighbor counts.
//!
//! The outermost row and column on every side form a permanent dead
//! border that is never toggled alive. Every mutable cell therefore has
//! all 8 of its neighbors inside the grid, which lets the mutation
//! primitives bump neighbor counts without edge special-casing.
//!
//! All mutations maintain the neighbor-count invariant incrementally:
//! a birth marks one cell alive and bumps exactly its 8 neighbors, and a
//! generation update builds the next board's counts from its own births
//! rather than recounting anything from the previous board.

use rand::Rng;

use crate::cell::Cell;
use crate::error::EngineError;
use crate::patterns::Pattern;

/// Smallest supported board edge: one interior cell plus the dead border.
pub const MIN_DIMENSION: usize = 3;

/// Largest supported board edge, bounding allocation from untrusted
/// viewer-supplied dimensions.
pub const MAX_DIMENSION: usize = 1024;

/// Outcome of a single-cell birth request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthOutcome {
    /// The cell was dead and is now alive.
    Born,
    /// The cell was already alive; nothing changed.
    AlreadyAlive,
}

/// Where a pattern landed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Leftmost column of the stamped footprint.
    pub x: usize,
    /// Topmost row of the stamped footprint.
    pub y: usize,
    /// Integer cell-replication factor that was applied.
    pub scale: usize,
}

/// The 8 grid coordinates adjacent to `(x, y)`.
///
/// Callers only invoke this for interior cells, where none of the
/// saturating operations can actually saturate.
const fn neighbor_coords(x: usize, y: usize) -> [(usize, usize); 8] {
    let left = x.saturating_sub(1);
    let right = x.saturating_add(1);
    let above = y.saturating_sub(1);
    let below = y.saturating_add(1);
    [
        (left, above),
        (x, above),
        (right, above),
        (left, y),
        (right, y),
        (left, below),
        (x, below),
        (right, below),
    ]
}

/// A Width x Height grid of [`Cell`] in row-major order.
///
/// Dimensions are fixed for the board's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an all-dead board of the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDimensions`] if either axis falls
    /// outside `MIN_DIMENSION..=MAX_DIMENSION`.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        let range = MIN_DIMENSION..=MAX_DIMENSION;
        if !range.contains(&width) || !range.contains(&height) {
            return Err(EngineError::InvalidDimensions {
                width,
                height,
                min: MIN_DIMENSION,
                max: MAX_DIMENSION,
            });
        }
        // Cannot overflow: both axes are bounded by MAX_DIMENSION.
        let cell_count = width.saturating_mul(height);
        Ok(Self {
            width,
            height,
            cells: vec![Cell::DEAD; cell_count],
        })
    }

    /// Board width in cells, border included.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Board height in cells, border included.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Width of the mutable interior (board width minus the border).
    pub const fn interior_width(&self) -> usize {
        self.width.saturating_sub(2)
    }

    /// Height of the mutable interior (board height minus the border).
    pub const fn interior_height(&self) -> usize {
        self.height.saturating_sub(2)
    }

    /// Whether `(x, y)` lies in the mutable interior.
    pub const fn is_interior(&self, x: usize, y: usize) -> bool {
        x >= 1 && y >= 1 && x < self.width.saturating_sub(1) && y < self.height.saturating_sub(1)
    }

    /// Flat index of `(x, y)`, or `None` when off the grid.
    const fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        match y.checked_mul(self.width) {
            Some(base) => base.checked_add(x),
            None => None,
        }
    }

    /// The cell at `(x, y)`, or `None` when off the grid.
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.index(x, y)
            .and_then(|idx| self.cells.get(idx))
            .copied()
    }

    fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        self.index(x, y).and_then(|idx| self.cells.get_mut(idx))
    }

    /// Mark an interior cell alive and bump its 8 neighbors.
    ///
    /// Precondition: `(x, y)` is interior and currently dead. Both are
    /// checked by every public caller before reaching here.
    fn raise(&mut self, x: usize, y: usize) {
        if let Some(cell) = self.cell_mut(x, y) {
            cell.alive = true;
        }
        for (nx, ny) in neighbor_coords(x, y) {
            if let Some(cell) = self.cell_mut(nx, ny) {
                cell.neighbors = cell.neighbors.saturating_add(1);
            }
        }
    }

    /// Birth a single interior cell.
    ///
    /// Idempotent: an already-alive cell is reported as
    /// [`BirthOutcome::AlreadyAlive`] and nothing changes.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfBounds`] for coordinates outside the
    /// interior. The border is never a valid target.
    pub fn birth(&mut self, x: usize, y: usize) -> Result<BirthOutcome, EngineError> {
        if !self.is_interior(x, y) {
            return Err(EngineError::OutOfBounds { x, y });
        }
        if self.cell(x, y).is_some_and(|cell| cell.alive) {
            return Ok(BirthOutcome::AlreadyAlive);
        }
        self.raise(x, y);
        Ok(BirthOutcome::Born)
    }

    /// Advance the board one generation. Returns the number of cells
    /// alive in the new generation.
    ///
    /// The next board starts all-dead and its neighbor counts are built
    /// incrementally as births are applied; the previous board's counts
    /// are only read, never copied.
    pub fn step(&mut self) -> u32 {
        let mut next = vec![Cell::DEAD; self.cells.len()];
        let mut live_cells: u32 = 0;

        for y in 1..self.height.saturating_sub(1) {
            for x in 1..self.width.saturating_sub(1) {
                let survives = self.cell(x, y).is_some_and(Cell::next_alive);
                if !survives {
                    continue;
                }
                if let Some(idx) = self.index(x, y) {
                    if let Some(cell) = next.get_mut(idx) {
                        cell.alive = true;
                    }
                }
                for (nx, ny) in neighbor_coords(x, y) {
                    if let Some(idx) = self.index(nx, ny) {
                        if let Some(cell) = next.get_mut(idx) {
                            cell.neighbors = cell.neighbors.saturating_add(1);
                        }
                    }
                }
                live_cells = live_cells.saturating_add(1);
            }
        }

        self.cells = next;
        live_cells
    }

    /// Reset every cell, border included, to dead with a zero count.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::DEAD;
        }
    }

    /// Birth each dead interior cell independently with probability
    /// `percentage / 100`. Returns the number of cells seeded.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPercentage`] when `percentage > 100`.
    pub fn seed_random(
        &mut self,
        percentage: u8,
        rng: &mut impl Rng,
    ) -> Result<u32, EngineError> {
        if percentage > 100 {
            return Err(EngineError::InvalidPercentage { percentage });
        }
        let threshold = u32::from(percentage);
        let mut seeded: u32 = 0;
        for y in 1..self.height.saturating_sub(1) {
            for x in 1..self.width.saturating_sub(1) {
                let dead = self.cell(x, y).is_some_and(|cell| !cell.alive);
                if dead && rng.random_range(0..100_u32) < threshold {
                    self.raise(x, y);
                    seeded = seeded.saturating_add(1);
                }
            }
        }
        Ok(seeded)
    }

    /// Stamp a pattern at a uniformly random offset where its scaled
    /// footprint fits entirely within the interior.
    ///
    /// Each "on" cell of the (scale-replicated) pattern is stamped like a
    /// birth: already-alive cells are skipped, every actual birth bumps
    /// its 8 neighbors.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PatternTooLarge`] when the scaled footprint
    /// exceeds the interior; the board is left unchanged.
    pub fn stamp(
        &mut self,
        pattern: &Pattern,
        rng: &mut impl Rng,
    ) -> Result<Placement, EngineError> {
        let scale = pattern.scale_for(self.width);
        let scaled_width = pattern.width().saturating_mul(scale);
        let scaled_height = pattern.height().saturating_mul(scale);
        if scaled_width > self.interior_width() || scaled_height > self.interior_height() {
            return Err(EngineError::PatternTooLarge {
                name: pattern.name().to_owned(),
                width: scaled_width,
                height: scaled_height,
                scale,
                interior_width: self.interior_width(),
                interior_height: self.interior_height(),
            });
        }

        // Interior spans 1..=width-2; the footprint's rightmost column is
        // x0 + scaled_width - 1, so the largest valid x0 keeps it at
        // width-2. The fit check above guarantees max_x0 >= 1.
        let max_x0 = self.width.saturating_sub(1).saturating_sub(scaled_width);
        let max_y0 = self.height.saturating_sub(1).saturating_sub(scaled_height);
        let x0 = rng.random_range(1..=max_x0);
        let y0 = rng.random_range(1..=max_y0);

        for (py, row) in pattern.rows().iter().enumerate() {
            for (px, &on) in row.iter().enumerate() {
                if on == 0 {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        let x = x0
                            .saturating_add(px.saturating_mul(scale))
                            .saturating_add(sx);
                        let y = y0
                            .saturating_add(py.saturating_mul(scale))
                            .saturating_add(sy);
                        if self.cell(x, y).is_some_and(|cell| !cell.alive) {
                            self.raise(x, y);
                        }
                    }
                }
            }
        }

        Ok(Placement {
            x: x0,
            y: y0,
            scale,
        })
    }

    /// Number of alive cells on the board.
    pub fn live_cells(&self) -> u32 {
        let alive = self.cells.iter().filter(|cell| cell.alive).count();
        // Bounded by MAX_DIMENSION^2 = 2^20, which fits u32.
        u32::try_from(alive).unwrap_or(u32::MAX)
    }

    /// Board rows in wire form: each row's cells packed into bytes.
    pub fn packed_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|cell| cell.encode()).collect())
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::patterns;

    /// Recount every cell's live neighbors from scratch and compare
    /// against the cached counts.
    fn neighbor_invariant_holds(board: &Board) -> bool {
        for y in 0..board.height() {
            for x in 0..board.width() {
                let cell = board.cell(x, y).unwrap();
                let mut live = 0_u8;
                for dy in [-1_isize, 0, 1] {
                    for dx in [-1_isize, 0, 1] {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = x.checked_add_signed(dx);
                        let ny = y.checked_add_signed(dy);
                        if let (Some(nx), Some(ny)) = (nx, ny) {
                            if board.cell(nx, ny).is_some_and(|n| n.alive) {
                                live += 1;
                            }
                        }
                    }
                }
                if cell.neighbors != live {
                    return false;
                }
            }
        }
        true
    }

    /// All alive coordinates on the board.
    fn alive_set(board: &Board) -> Vec<(usize, usize)> {
        let mut alive = Vec::new();
        for y in 0..board.height() {
            for x in 0..board.width() {
                if board.cell(x, y).unwrap().alive {
                    alive.push((x, y));
                }
            }
        }
        alive
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    #[test]
    fn new_board_is_all_dead() {
        let board = Board::new(8, 6).unwrap();
        assert_eq!(board.width(), 8);
        assert_eq!(board.height(), 6);
        assert_eq!(board.live_cells(), 0);
        assert!(neighbor_invariant_holds(&board));
    }

    #[test]
    fn dimensions_below_minimum_rejected() {
        assert!(matches!(
            Board::new(2, 10),
            Err(EngineError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Board::new(10, 0),
            Err(EngineError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn dimensions_above_maximum_rejected() {
        assert!(matches!(
            Board::new(MAX_DIMENSION + 1, 10),
            Err(EngineError::InvalidDimensions { .. })
        ));
    }

    // ------------------------------------------------------------------
    // Birth
    // ------------------------------------------------------------------

    #[test]
    fn birth_sets_cell_alive_and_bumps_exactly_eight_neighbors() {
        let mut board = Board::new(5, 5).unwrap();
        assert_eq!(board.birth(2, 2), Ok(BirthOutcome::Born));

        assert!(board.cell(2, 2).unwrap().alive);
        assert_eq!(board.cell(2, 2).unwrap().neighbors, 0);

        let mut bumped = 0;
        for y in 0..5 {
            for x in 0..5 {
                let cell = board.cell(x, y).unwrap();
                if (x, y) == (2, 2) {
                    continue;
                }
                if cell.neighbors == 1 {
                    bumped += 1;
                } else {
                    assert_eq!(cell.neighbors, 0);
                }
            }
        }
        assert_eq!(bumped, 8);
        assert!(neighbor_invariant_holds(&board));
    }

    #[test]
    fn birth_on_alive_cell_is_a_reported_noop() {
        let mut board = Board::new(5, 5).unwrap();
        board.birth(2, 2).unwrap();
        let before = board.clone();

        assert_eq!(board.birth(2, 2), Ok(BirthOutcome::AlreadyAlive));
        assert_eq!(board, before);
    }

    #[test]
    fn birth_outside_interior_rejected_without_mutation() {
        let mut board = Board::new(5, 5).unwrap();
        let before = board.clone();

        // Border cells and fully off-grid coordinates are both rejected.
        for (x, y) in [(0, 2), (2, 0), (4, 2), (2, 4), (7, 7)] {
            assert_eq!(board.birth(x, y), Err(EngineError::OutOfBounds { x, y }));
        }
        assert_eq!(board, before);
    }

    // ------------------------------------------------------------------
    // Generation update
    // ------------------------------------------------------------------

    #[test]
    fn blinker_oscillates_with_period_two() {
        // 5x5 board: the 3x3 interior exactly fits a blinker.
        let mut board = Board::new(5, 5).unwrap();
        for x in 1..=3 {
            board.birth(x, 2).unwrap();
        }
        let horizontal = alive_set(&board);

        assert_eq!(board.step(), 3);
        assert_eq!(alive_set(&board), vec![(2, 1), (2, 2), (2, 3)]);
        assert!(neighbor_invariant_holds(&board));

        assert_eq!(board.step(), 3);
        assert_eq!(alive_set(&board), horizontal);
        assert!(neighbor_invariant_holds(&board));
    }

    #[test]
    fn glider_translates_by_one_one_after_four_ticks() {
        let mut board = Board::new(16, 16).unwrap();
        // Glider with its bounding box at (2, 2).
        let offsets = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        for (dx, dy) in offsets {
            board.birth(2 + dx, 2 + dy).unwrap();
        }

        for _ in 0..4 {
            board.step();
            assert!(neighbor_invariant_holds(&board));
        }

        let expected: Vec<(usize, usize)> = {
            let mut cells: Vec<(usize, usize)> =
                offsets.iter().map(|&(dx, dy)| (3 + dx, 3 + dy)).collect();
            cells.sort_unstable_by_key(|&(x, y)| (y, x));
            cells
        };
        assert_eq!(alive_set(&board), expected);
    }

    #[test]
    fn step_on_all_dead_board_stays_dead() {
        let mut board = Board::new(10, 10).unwrap();
        assert_eq!(board.step(), 0);
        assert_eq!(board.live_cells(), 0);
    }

    #[test]
    fn lone_cell_dies_of_isolation() {
        let mut board = Board::new(5, 5).unwrap();
        board.birth(2, 2).unwrap();
        assert_eq!(board.step(), 0);
        assert_eq!(board.live_cells(), 0);
    }

    #[test]
    fn neighbor_invariant_survives_random_churn() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut board = Board::new(20, 14).unwrap();
        board.seed_random(35, &mut rng).unwrap();
        assert!(neighbor_invariant_holds(&board));

        for _ in 0..10 {
            board.step();
            assert!(neighbor_invariant_holds(&board));
        }
    }

    // ------------------------------------------------------------------
    // Clear
    // ------------------------------------------------------------------

    #[test]
    fn clear_resets_everything() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut board = Board::new(12, 12).unwrap();
        board.seed_random(50, &mut rng).unwrap();
        assert!(board.live_cells() > 0);

        board.clear();
        assert_eq!(board.live_cells(), 0);
        assert_eq!(board, Board::new(12, 12).unwrap());
    }

    // ------------------------------------------------------------------
    // Random seeding
    // ------------------------------------------------------------------

    #[test]
    fn seed_random_zero_percent_births_nothing() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut board = Board::new(10, 10).unwrap();
        assert_eq!(board.seed_random(0, &mut rng), Ok(0));
        assert_eq!(board.live_cells(), 0);
    }

    #[test]
    fn seed_random_hundred_percent_fills_the_interior() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut board = Board::new(6, 5).unwrap();
        let interior = u32::try_from(board.interior_width() * board.interior_height()).unwrap();
        assert_eq!(board.seed_random(100, &mut rng), Ok(interior));
        assert_eq!(board.live_cells(), interior);
        assert!(neighbor_invariant_holds(&board));
    }

    #[test]
    fn seed_random_rejects_percentage_above_hundred() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut board = Board::new(10, 10).unwrap();
        assert_eq!(
            board.seed_random(101, &mut rng),
            Err(EngineError::InvalidPercentage { percentage: 101 })
        );
        assert_eq!(board.live_cells(), 0);
    }

    #[test]
    fn seed_random_never_touches_the_border() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut board = Board::new(9, 9).unwrap();
        board.seed_random(100, &mut rng).unwrap();
        for i in 0..9 {
            assert!(!board.cell(i, 0).unwrap().alive);
            assert!(!board.cell(i, 8).unwrap().alive);
            assert!(!board.cell(0, i).unwrap().alive);
            assert!(!board.cell(8, i).unwrap().alive);
        }
    }

    // ------------------------------------------------------------------
    // Pattern stamping
    // ------------------------------------------------------------------

    #[test]
    fn stamped_glider_lands_inside_the_interior() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut board = Board::new(20, 20).unwrap();
        let pattern = patterns::lookup("glider").unwrap();

        let placement = board.stamp(&pattern, &mut rng).unwrap();
        assert_eq!(placement.scale, 1);
        assert_eq!(board.live_cells(), 5);
        assert!(neighbor_invariant_holds(&board));
        for (x, y) in alive_set(&board) {
            assert!(board.is_interior(x, y));
        }
    }

    #[test]
    fn stamping_is_idempotent_per_cell() {
        // Fill the interior, then stamp: every pattern cell is already
        // alive, so nothing may change.
        let mut rng = SmallRng::seed_from_u64(5);
        let mut board = Board::new(20, 20).unwrap();
        board.seed_random(100, &mut rng).unwrap();
        let before = board.clone();

        let pattern = patterns::lookup("blinker").unwrap();
        board.stamp(&pattern, &mut rng).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn oversized_pattern_rejected_and_board_unchanged() {
        let mut rng = SmallRng::seed_from_u64(9);
        // 10x10 board has an 8x8 interior; the 13x13 pulsar cannot fit.
        let mut board = Board::new(10, 10).unwrap();
        board.birth(4, 4).unwrap();
        let before = board.clone();

        let pattern = patterns::lookup("pulsar").unwrap();
        let result = board.stamp(&pattern, &mut rng);
        assert!(matches!(result, Err(EngineError::PatternTooLarge { .. })));
        assert_eq!(board, before);
    }

    // ------------------------------------------------------------------
    // Wire rows
    // ------------------------------------------------------------------

    #[test]
    fn packed_rows_encode_alive_flag_and_counts() {
        let mut board = Board::new(3, 3).unwrap();
        board.birth(1, 1).unwrap();

        let rows = board.packed_rows();
        assert_eq!(rows, vec![vec![1, 1, 1], vec![1, 100, 1], vec![1, 1, 1]]);
    }
}
