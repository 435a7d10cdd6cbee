//! Breadth-first distance field

use std::collections::VecDeque;

use crate::{Cell, Grid};

/// Shortest hop counts from one source cell to every cell of a grid
///
/// Unreached cells have distance `-1` and no parent. The field is a snapshot:
/// it does not follow later edits of the grid it was computed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceField {
    source: Cell,
    rows: usize,
    cols: usize,
    distances: Vec<i32>,
    parents: Vec<Option<Cell>>,
}

impl DistanceField {
    fn unreached(grid: &Grid, source: Cell) -> Self {
        let len = grid.rows() * grid.cols();
        Self {
            source,
            rows: grid.rows(),
            cols: grid.cols(),
            distances: vec![-1; len],
            parents: vec![None; len],
        }
    }

    pub fn source(&self) -> Cell {
        self.source
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Hop count from the source to `cell`
    ///
    /// `-1` both for unreachable cells and for cells outside the grid.
    pub fn distance_to(&self, cell: Cell) -> i32 {
        self.index(cell).map_or(-1, |i| self.distances[i])
    }

    /// Cell from which `cell` was first reached
    ///
    /// `None` for the source itself, unreached cells and cells outside the grid.
    pub fn parent(&self, cell: Cell) -> Option<Cell> {
        self.index(cell).and_then(|i| self.parents[i])
    }

    /// Row-major distance table
    pub fn distances(&self) -> &[i32] {
        &self.distances
    }

    /// Cells with a known distance, in row-major order
    pub fn reached(&self) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols;
        self.distances
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d >= 0)
            .map(move |(i, _)| Cell::new((i / cols) as i32, (i % cols) as i32))
    }

    /// Shortest path from the source to `target`, see [reconstruct_path]
    pub fn path_to(&self, target: Cell) -> Vec<Cell> {
        reconstruct_path(self, self.source, target)
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let row = usize::try_from(cell.row).ok()?;
        let col = usize::try_from(cell.col).ok()?;
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}

/// Breadth-first search from `source` over the floor cells of `grid`
///
/// Each cell is labelled the first time it is seen, which in BFS order is
/// along a shortest path. A `source` that is a wall, or lies outside the
/// grid, reaches nothing.
///
/// # Examples
/// ```
/// use tilt_maze::{Cell, Grid};
/// use tilt_maze::pathfinding::compute_distances;
///
/// let grid = Grid::new(3, 3).unwrap();
/// let field = compute_distances(&grid, Cell::new(0, 0));
/// assert_eq!(field.distance_to(Cell::new(2, 2)), 4);
/// assert_eq!(field.distance_to(Cell::new(3, 3)), -1);
/// assert_eq!(field.path_to(Cell::new(0, 2)).len(), 3);
/// ```
pub fn compute_distances(grid: &Grid, source: Cell) -> DistanceField {
    let mut field = DistanceField::unreached(grid, source);
    if grid.is_wall(source) {
        log::warn!("distance field source {source} is a wall or outside the grid");
        return field;
    }
    let Some(start) = field.index(source) else {
        return field;
    };

    let mut queue = VecDeque::from([source]);
    field.distances[start] = 0;

    while let Some(current) = queue.pop_front() {
        let Some(current_index) = field.index(current) else {
            continue;
        };
        let next_distance = field.distances[current_index] + 1;

        for next in current.neighbors() {
            if grid.is_wall(next) {
                continue;
            }
            let Some(next_index) = field.index(next) else {
                continue;
            };
            if field.distances[next_index] >= 0 {
                continue;
            }
            field.distances[next_index] = next_distance;
            field.parents[next_index] = Some(current);
            queue.push_back(next);
        }
    }
    field
}

/// Walk parent links of `field` from `target` back to `source`
///
/// Returns the path from `source` to `target` inclusive, or an empty path if
/// `target` was never reached or the parent chain does not lead to `source`.
pub fn reconstruct_path(field: &DistanceField, source: Cell, target: Cell) -> Vec<Cell> {
    if target == source {
        return vec![source];
    }
    if field.parent(target).is_none() {
        return Vec::new();
    }

    let mut path = vec![target];
    let mut current = target;
    while current != source {
        // A broken chain ends at a cell without parent
        let Some(prev) = field.parent(current) else {
            return Vec::new();
        };
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
