//! Path search over a [Grid]
//!
//! Searches never keep state between calls: after editing the grid, search
//! again.

pub mod astar;
pub mod bfs;

use clap::ValueEnum;

pub use bfs::{compute_distances, reconstruct_path, DistanceField};

use crate::{Cell, Grid};

/// Search algorithm usable in place of another
pub trait PathFinder {
    /// Shortest path from `start` to `goal`, both included; empty if unreachable
    fn find_path(&self, grid: &Grid, start: Cell, goal: Cell) -> Vec<Cell>;

    /// Hop counts from `source` to every cell
    fn compute_distances(&self, grid: &Grid, source: Cell) -> DistanceField {
        bfs::compute_distances(grid, source)
    }
}

/// A* with a Manhattan heuristic
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

impl PathFinder for AStar {
    fn find_path(&self, grid: &Grid, start: Cell, goal: Cell) -> Vec<Cell> {
        astar::find_path(grid, start, goal)
    }
}

/// Breadth-first search; on a uniform-cost grid this is also Dijkstra
#[derive(Debug, Clone, Copy, Default)]
pub struct Bfs;

impl PathFinder for Bfs {
    fn find_path(&self, grid: &Grid, start: Cell, goal: Cell) -> Vec<Cell> {
        bfs::compute_distances(grid, start).path_to(goal)
    }
}

/// Available [PathFinder]s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Algorithm {
    #[default]
    #[value(name = "astar")]
    AStar,
    Bfs,
}

impl Algorithm {
    pub fn finder(self) -> &'static dyn PathFinder {
        match self {
            Algorithm::AStar => &AStar,
            Algorithm::Bfs => &Bfs,
        }
    }
}

/// Waypoints of a path, handed out one at a time
///
/// # Examples
/// ```
/// use tilt_maze::{Cell, Grid};
/// use tilt_maze::pathfinding::{Algorithm, Plan};
///
/// let grid = Grid::new(1, 3).unwrap();
/// let mut plan = Plan::search(Algorithm::AStar, &grid, Cell::new(0, 0), Cell::new(0, 2));
/// assert_eq!(plan.next_waypoint(), Some(Cell::new(0, 0)));
/// assert_eq!(plan.next_waypoint(), Some(Cell::new(0, 1)));
/// assert_eq!(plan.next_waypoint(), Some(Cell::new(0, 2)));
/// assert!(plan.is_finished());
/// assert_eq!(plan.next_waypoint(), Some(Cell::new(0, 2)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plan {
    cells: Vec<Cell>,
    next: usize,
}

impl Plan {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells, next: 0 }
    }

    /// Plan a path with `algorithm`; logs a warning when there is none
    pub fn search(algorithm: Algorithm, grid: &Grid, start: Cell, goal: Cell) -> Self {
        let cells = algorithm.finder().find_path(grid, start, goal);
        if cells.is_empty() {
            log::warn!("no path from {start} to {goal}");
        }
        Self::new(cells)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves, one less than the number of cells
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Next waypoint; repeats the last one once the plan is used up
    ///
    /// `None` only for an empty plan.
    pub fn next_waypoint(&mut self) -> Option<Cell> {
        let cell = self.cells.get(self.next).or(self.cells.last()).copied();
        if self.next < self.cells.len() {
            self.next += 1;
        }
        cell
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.cells.len()
    }
}
