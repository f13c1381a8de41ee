//! Typed rejections for simulation mutations.
//!
//! Every mutation validates its input before touching the board, so these
//! errors are the only failure modes -- a validated mutation cannot fail
//! partway through and there is nothing to roll back.

/// Errors produced by board and game mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Requested board dimensions fall outside the supported range.
    #[error("invalid board dimensions {width}x{height} (each axis must be {min}..={max})")]
    InvalidDimensions {
        /// Requested board width.
        width: usize,
        /// Requested board height.
        height: usize,
        /// Smallest supported edge length.
        min: usize,
        /// Largest supported edge length.
        max: usize,
    },

    /// Coordinates outside the mutable interior of the board.
    ///
    /// The border rows and columns are a permanent dead buffer; they are
    /// never valid targets for a birth.
    #[error("coordinates ({x}, {y}) are outside the board interior")]
    OutOfBounds {
        /// Requested x coordinate.
        x: usize,
        /// Requested y coordinate.
        y: usize,
    },

    /// Random-seeding percentage above 100.
    #[error("seeding percentage {percentage} exceeds 100")]
    InvalidPercentage {
        /// The rejected percentage value.
        percentage: u8,
    },

    /// No pattern with the given name exists in the pattern table.
    #[error("unknown pattern: {name}")]
    UnknownPattern {
        /// The name that failed to resolve.
        name: String,
    },

    /// The scaled pattern footprint does not fit the board interior.
    ///
    /// Surfaced as a rejection before any cell is written; the board is
    /// left untouched.
    #[error(
        "pattern {name} needs a {width}x{height} interior at scale {scale}, \
         board interior is {interior_width}x{interior_height}"
    )]
    PatternTooLarge {
        /// The pattern that was requested.
        name: String,
        /// Scaled pattern width in cells.
        width: usize,
        /// Scaled pattern height in cells.
        height: usize,
        /// The scale factor that was derived for the board.
        scale: usize,
        /// Available interior width.
        interior_width: usize,
        /// Available interior height.
        interior_height: usize,
    },
}
