//! Named seed patterns and their placement scale rules.
//!
//! The table carries the pattern names the viewer client emits. Geometry
//! is plain data: the stamping algorithm in
//! [`Board::stamp`](crate::board::Board::stamp) is pattern-agnostic and
//! only consumes the 0/1 matrix plus the derived scale factor.

/// How a pattern's integer scale factor is derived from the board width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleRule {
    /// Always stamped at scale 1.
    Fixed,
    /// Scale chosen so the scaled pattern spans roughly half the board
    /// width.
    HalfWidth,
    /// Scale chosen so the scaled pattern spans roughly three quarters of
    /// the board width.
    ThreeQuarterWidth,
}

/// A named 0/1 seed matrix with its scale rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    name: &'static str,
    rows: Vec<Vec<u8>>,
    scale_rule: ScaleRule,
}

impl Pattern {
    /// The wire name this pattern resolves from.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The 0/1 seed matrix, row-major.
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// Unscaled pattern width in cells.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Unscaled pattern height in cells.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// The rule used to derive this pattern's scale factor.
    pub const fn scale_rule(&self) -> ScaleRule {
        self.scale_rule
    }

    /// Integer scale factor for a board of the given width (always >= 1).
    ///
    /// Whether the scaled footprint actually fits the board is the
    /// stamping operation's capacity check, not this function's concern.
    pub fn scale_for(&self, board_width: usize) -> usize {
        let pattern_width = self.width().max(1);
        let scale = match self.scale_rule {
            ScaleRule::Fixed => 1,
            ScaleRule::HalfWidth => board_width
                .checked_div(pattern_width.saturating_mul(2))
                .unwrap_or(1),
            ScaleRule::ThreeQuarterWidth => board_width
                .saturating_mul(3)
                .checked_div(pattern_width.saturating_mul(4))
                .unwrap_or(1),
        };
        scale.max(1)
    }
}

/// Names of every pattern in the table, in lookup order.
pub const NAMES: &[&str] = &[
    "glider",
    "blinker",
    "toad",
    "pulsar",
    "gosper_glider_gun",
    "r_pentomino",
    "snark",
    "2_engine",
    "david_hilbert",
];

/// Resolve a pattern by its wire name.
///
/// Returns `None` for names outside the table; callers turn that into a
/// typed rejection.
pub fn lookup(name: &str) -> Option<Pattern> {
    match name {
        "glider" => Some(from_matrix(
            "glider",
            ScaleRule::Fixed,
            &[&[0, 1, 0], &[0, 0, 1], &[1, 1, 1]],
        )),
        "blinker" => Some(from_matrix("blinker", ScaleRule::Fixed, &[&[1, 1, 1]])),
        "toad" => Some(from_matrix(
            "toad",
            ScaleRule::Fixed,
            &[&[0, 1, 1, 1], &[1, 1, 1, 0]],
        )),
        "pulsar" => Some(from_matrix(
            "pulsar",
            ScaleRule::Fixed,
            &[
                &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
            ],
        )),
        "gosper_glider_gun" => Some(from_matrix(
            "gosper_glider_gun",
            ScaleRule::HalfWidth,
            &[
                &[
                    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0,
                    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
                ],
                &[
                    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0,
                    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
                ],
                &[
                    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0,
                    0, 0, 0, 0, 0, 0, 0, 0, 1, 1,
                ],
                &[
                    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0,
                    0, 0, 0, 0, 0, 0, 0, 0, 1, 1,
                ],
                &[
                    1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 1, 0, 0, 0, 0,
                    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
                ],
                &[
                    1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 1, 1, 0, 0, 0, 0, 1, 0, 1, 0,
                    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
                ],
                &[
                    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0,
                    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
                ],
                &[
                    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
                    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
                ],
                &[
                    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
                    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
                ],
            ],
        )),
        "r_pentomino" => Some(from_matrix(
            "r_pentomino",
            ScaleRule::HalfWidth,
            &[&[0, 1, 1], &[1, 1, 0], &[0, 1, 0]],
        )),
        "snark" => Some(from_matrix(
            "snark",
            ScaleRule::HalfWidth,
            &[
                &[1, 1, 0, 0, 0, 0, 0, 0],
                &[1, 0, 1, 0, 0, 0, 0, 0],
                &[0, 0, 1, 0, 0, 0, 0, 0],
                &[0, 0, 1, 1, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 0, 1, 1],
                &[0, 0, 0, 0, 0, 0, 1, 1],
            ],
        )),
        "2_engine" => Some(from_matrix(
            "2_engine",
            ScaleRule::HalfWidth,
            &[
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            ],
        )),
        "david_hilbert" => Some(checkerboard_64("david_hilbert")),
        _ => None,
    }
}

/// Build a pattern from a static 0/1 matrix.
fn from_matrix(name: &'static str, scale_rule: ScaleRule, matrix: &[&[u8]]) -> Pattern {
    Pattern {
        name,
        rows: matrix.iter().map(|row| row.to_vec()).collect(),
        scale_rule,
    }
}

/// The 64x64 checkerboard fill the original client calls
/// `david_hilbert` (a visual approximation of the curve, generated
/// rather than tabulated).
fn checkerboard_64(name: &'static str) -> Pattern {
    let rows = (0..64_usize)
        .map(|y| {
            (0..64_usize)
                .map(|x| u8::from((x ^ y) & 1 == 0))
                .collect()
        })
        .collect();
    Pattern {
        name,
        rows,
        scale_rule: ScaleRule::ThreeQuarterWidth,
    }
}
