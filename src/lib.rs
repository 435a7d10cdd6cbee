//! Generate mazes for a tilting-platform ball game and find the way out
//!
//! A maze is carved from a seed and a difficulty, expanded into a wall
//! [Grid], and handed to a path finder that plans the ball's route from the
//! start cell to the exit.
//!
//! # Examples
//! ## Generate and solve
//! ```
//! use tilt_maze::{generate, MazeConfig};
//! use tilt_maze::pathfinding::{astar, compute_distances};
//!
//! let maze = generate(&MazeConfig::new(3, 3, 42, 0.0)).unwrap();
//! let path = astar::find_path(&maze.grid, maze.start, maze.exit);
//! let field = compute_distances(&maze.grid, maze.start);
//! assert_eq!(path.len() as i32, field.distance_to(maze.exit) + 1);
//! ```
//!
//! ## Edit walls at runtime
//! ```
//! use tilt_maze::{ascii, Cell};
//! use tilt_maze::pathfinding::astar;
//!
//! let mut map = ascii::parse("#######\n#B    #\n# ### #\n#    E#\n#######").unwrap();
//! let (start, exit) = (map.start.unwrap(), map.exit.unwrap());
//! assert_eq!(astar::find_path(&map.grid, start, exit).len(), 7);
//!
//! map.grid.add_wall(Cell::new(3, 2));
//! assert_eq!(astar::find_path(&map.grid, start, exit).len(), 7);
//!
//! map.grid.add_wall(Cell::new(1, 4));
//! assert!(astar::find_path(&map.grid, start, exit).is_empty());
//! ```

pub mod ascii;
mod error;
pub mod grid;
pub mod maze_generator;
pub mod padding;
pub mod pathfinding;

pub use error::MazeError;
pub use grid::{Cell, Grid};
pub use maze_generator::{generate, MazeConfig, MazeGenerator};

/// Generated maze: the wall grid with ball start and exit cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    pub grid: Grid,
    pub start: Cell,
    pub exit: Cell,
}

impl Maze {
    /// Surround the maze with a wall border, see [padding::pad]
    pub fn padded(self, thickness: usize) -> Result<Maze, MazeError> {
        padding::pad(self, thickness)
    }

    /// Text form of the maze, see [ascii::render]
    pub fn render(&self, path: &[Cell]) -> String {
        ascii::render(&self.grid, Some(self.start), Some(self.exit), path)
    }
}
