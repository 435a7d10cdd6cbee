//! Mutable wall/floor grid

use std::fmt;

use crate::MazeError;

/// Location in the grid
///
/// Rows grow downward, columns grow to the right. Coordinates are signed so
/// that neighbours of border cells can be probed without wrapping; such cells
/// are simply out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Cell shifted by `(d_row, d_col)`
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Manhattan distance to `other`
    pub fn manhattan(self, other: Cell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The four orthogonal neighbours: up, down, left, right
    pub fn neighbors(self) -> [Cell; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Rectangular table of walls (`true`) and walkable floor (`false`)
///
/// Dimensions are fixed at construction. Every access is bounds-checked:
/// anything outside the grid reads as a wall, and edits outside the grid are
/// ignored with a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major wall flags
    walls: Vec<bool>,
}

impl Grid {
    /// Grid of `rows` x `cols` floor cells
    ///
    /// # Examples
    /// ```
    /// use tilt_maze::{Cell, Grid};
    ///
    /// let mut grid = Grid::new(3, 4).unwrap();
    /// grid.add_wall(Cell::new(1, 2));
    /// assert!(grid.is_wall(Cell::new(1, 2)));
    /// assert!(grid.is_wall(Cell::new(-1, 0)));
    /// assert!(!grid.is_wall(Cell::new(0, 0)));
    /// ```
    pub fn new(rows: usize, cols: usize) -> Result<Self, MazeError> {
        Self::filled(rows, cols, false)
    }

    /// Grid of `rows` x `cols` cells, every cell set to `wall`
    ///
    /// Both dimensions must be positive and addressable by a [Cell].
    pub fn filled(rows: usize, cols: usize, wall: bool) -> Result<Self, MazeError> {
        let len =
            Self::cell_count(rows, cols).ok_or(MazeError::InvalidDimensions { rows, cols })?;
        Ok(Self {
            rows,
            cols,
            walls: vec![wall; len],
        })
    }

    /// Number of cells of a `rows` x `cols` grid, if such a grid can exist
    fn cell_count(rows: usize, cols: usize) -> Option<usize> {
        let max_side = i32::MAX as usize;
        if rows == 0 || cols == 0 || rows > max_side || cols > max_side {
            return None;
        }
        rows.checked_mul(cols).filter(|&len| len <= isize::MAX as usize)
    }

    /// Build a grid from rows of wall flags
    ///
    /// Column count is taken from the first row. Shorter rows are padded with
    /// walls, longer ones truncated.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, MazeError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut grid = Self::filled(n_rows, n_cols, true)?;
        for (r, row) in rows.into_iter().enumerate() {
            for (c, wall) in row.into_iter().take(n_cols).enumerate() {
                grid.walls[r * n_cols + c] = wall;
            }
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `cell` lies inside the grid
    pub fn contains(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    /// Wall flag of `cell`; `true` for anything out of bounds
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.index(cell).map_or(true, |i| self.walls[i])
    }

    pub fn add_wall(&mut self, cell: Cell) {
        if !self.set_wall(cell, true) {
            log::warn!("add_wall: cell {cell} is outside the {}x{} grid", self.rows, self.cols);
        }
    }

    pub fn remove_wall(&mut self, cell: Cell) {
        if !self.set_wall(cell, false) {
            log::warn!("remove_wall: cell {cell} is outside the {}x{} grid", self.rows, self.cols);
        }
    }

    /// Set the wall flag of `cell`, returning whether the cell was in bounds
    pub fn set_wall(&mut self, cell: Cell, wall: bool) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.walls[i] = wall;
                true
            }
            None => false,
        }
    }

    /// Flip `cell` between wall and floor
    ///
    /// Returns the new wall flag, or `None` if the cell is out of bounds.
    /// Any plan computed before the toggle is stale afterwards.
    pub fn toggle_wall(&mut self, cell: Cell) -> Option<bool> {
        let Some(i) = self.index(cell) else {
            log::warn!("toggle_wall: cell {cell} is outside the {}x{} grid", self.rows, self.cols);
            return None;
        };
        self.walls[i] = !self.walls[i];
        Some(self.walls[i])
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols;
        (0..self.walls.len()).map(move |i| Cell::new((i / cols) as i32, (i % cols) as i32))
    }

    /// Floor cells in row-major order
    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(|&cell| !self.is_wall(cell))
    }

    /// First floor cell in row-major order
    pub fn first_open_cell(&self) -> Option<Cell> {
        self.open_cells().next()
    }

    /// Last floor cell in row-major order
    pub fn last_open_cell(&self) -> Option<Cell> {
        self.open_cells().last()
    }

    /// Row-major offset of `cell`, if it lies inside the grid
    pub(crate) fn index(&self, cell: Cell) -> Option<usize> {
        let row = usize::try_from(cell.row).ok()?;
        let col = usize::try_from(cell.col).ok()?;
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}
