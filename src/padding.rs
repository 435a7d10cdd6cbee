//! Wall border around an existing maze

use crate::{Grid, Maze, MazeError};

/// Surround `maze` with a wall border `thickness` cells wide
///
/// The interior is copied verbatim and the start and exit cells are shifted
/// by `thickness` along both axes. A thickness of zero returns the maze as is.
///
/// # Examples
/// ```
/// use tilt_maze::{generate, padding, Cell, MazeConfig};
///
/// let maze = generate(&MazeConfig::new(2, 2, 1, 0.0)).unwrap();
/// let start = maze.start;
/// let padded = padding::pad(maze, 2).unwrap();
/// assert_eq!((padded.grid.rows(), padded.grid.cols()), (9, 9));
/// assert_eq!(padded.start, start.offset(2, 2));
/// assert!(padded.grid.is_wall(Cell::new(0, 4)));
/// ```
pub fn pad(maze: Maze, thickness: usize) -> Result<Maze, MazeError> {
    if thickness == 0 {
        return Ok(maze);
    }
    let source = &maze.grid;
    let border = thickness.saturating_mul(2);
    let (rows, cols) = (
        source.rows().saturating_add(border),
        source.cols().saturating_add(border),
    );
    let mut grid = Grid::filled(rows, cols, true)?;
    let shift =
        i32::try_from(thickness).map_err(|_| MazeError::InvalidDimensions { rows, cols })?;
    for cell in source.cells() {
        grid.set_wall(cell.offset(shift, shift), source.is_wall(cell));
    }

    Ok(Maze {
        grid,
        start: maze.start.offset(shift, shift),
        exit: maze.exit.offset(shift, shift),
    })
}
