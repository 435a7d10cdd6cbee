//! Error type shared by the library modules

use thiserror::Error;

/// Misuse of the maze and grid constructors
///
/// Missing paths, unreachable cells and out-of-bounds wall edits are not
/// errors; those surface as empty plans, `-1` distances or logged warnings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Grid requested with a zero dimension
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Maze requested with a zero logical dimension
    #[error("maze size must be positive, got {width}x{height} cells")]
    InvalidMazeSize { width: usize, height: usize },

    /// ASCII map without a single non-blank row
    #[error("maze map is empty")]
    EmptyMap,
}
