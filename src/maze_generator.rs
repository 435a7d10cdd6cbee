//! Map generation
//!
//! Mazes are carved on a coarse grid of logical cells, each holding a bitmask
//! of its standing walls, and only then expanded into the fine [Grid] used by
//! the path finders. Logical cell `(col, row)` lands on grid cell
//! `(2 * row + 1, 2 * col + 1)`; the passages toward East and North sit one
//! grid cell to the right and one grid cell below it.

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{Cell, Grid, Maze, MazeError};

/// Parameters of a single maze
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeConfig {
    /// Logical cells along the columns
    pub width: usize,
    /// Logical cells along the rows
    pub height: usize,
    /// Seed of the generator; equal seeds give identical mazes
    pub seed: u64,
    /// 0 gives corridor-like mazes, 1 gives many loops. Clamped to `[0, 1]`.
    pub difficulty: f32,
}

impl MazeConfig {
    pub fn new(width: usize, height: usize, seed: u64, difficulty: f32) -> Self {
        Self {
            width,
            height,
            seed,
            difficulty,
        }
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self::new(10, 10, 0, 0.5)
    }
}

/// Generate a maze with a generator seeded from `config`
///
/// # Examples
/// ```
/// use tilt_maze::{generate, MazeConfig};
///
/// let maze = generate(&MazeConfig::new(3, 3, 42, 0.0)).unwrap();
/// assert_eq!((maze.grid.rows(), maze.grid.cols()), (7, 7));
/// assert!(!maze.grid.is_wall(maze.start));
/// ```
pub fn generate(config: &MazeConfig) -> Result<Maze, MazeError> {
    MazeGenerator::new(config.seed).generate(config.width, config.height, config.difficulty)
}

/// Side of a logical cell. Discriminants are the wall bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum Wall {
    East = 1,
    North = 2,
    West = 4,
    South = 8,
}

impl Wall {
    const ALL: [Wall; 4] = [Wall::East, Wall::North, Wall::West, Wall::South];
    const ALL_BITS: u8 = 0b1111;

    fn bit(self) -> u8 {
        self as u8
    }

    fn opposite(self) -> Wall {
        match self {
            Wall::East => Wall::West,
            Wall::North => Wall::South,
            Wall::West => Wall::East,
            Wall::South => Wall::North,
        }
    }

    /// (d_col, d_row) toward the neighbour behind this wall
    fn delta(self) -> (isize, isize) {
        match self {
            Wall::East => (1, 0),
            Wall::North => (0, 1),
            Wall::West => (-1, 0),
            Wall::South => (0, -1),
        }
    }
}

/// Logical cell as (col, row)
type Site = (usize, usize);

/// Coarse maze with a wall bitmask per logical cell
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogicalMaze {
    width: usize,
    height: usize,
    walls: Vec<u8>,
}

impl LogicalMaze {
    /// All walls standing
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            walls: vec![Wall::ALL_BITS; width * height],
        }
    }

    fn index(&self, (col, row): Site) -> usize {
        row * self.width + col
    }

    /// Neighbour of `site` behind `wall`, if inside the maze
    fn step(&self, (col, row): Site, wall: Wall) -> Option<Site> {
        let (d_col, d_row) = wall.delta();
        let col = col.checked_add_signed(d_col)?;
        let row = row.checked_add_signed(d_row)?;
        (col < self.width && row < self.height).then_some((col, row))
    }

    fn has_wall(&self, site: Site, wall: Wall) -> bool {
        self.walls[self.index(site)] & wall.bit() != 0
    }

    /// Clear `wall` on `site` and the matching wall on its neighbour
    fn remove_wall(&mut self, site: Site, wall: Wall) {
        let Some(other) = self.step(site, wall) else {
            return;
        };
        let (a, b) = (self.index(site), self.index(other));
        self.walls[a] &= !wall.bit();
        self.walls[b] &= !wall.opposite().bit();
    }

    fn open_sides(&self, site: Site) -> usize {
        Wall::ALL
            .into_iter()
            .filter(|&wall| !self.has_wall(site, wall))
            .count()
    }

    /// Sites column by column
    fn sites(&self) -> impl Iterator<Item = Site> {
        let height = self.height;
        (0..self.width).flat_map(move |col| (0..height).map(move |row| (col, row)))
    }

    /// Number of open passages between neighbouring sites
    fn passages(&self) -> usize {
        self.sites()
            .map(|site| {
                [Wall::East, Wall::North]
                    .into_iter()
                    .filter(|&wall| self.step(site, wall).is_some() && !self.has_wall(site, wall))
                    .count()
            })
            .sum()
    }

    /// Corner across from `start`: the top-right site, or the origin when
    /// `start` already occupies the top-right
    fn exit_for(&self, start: Site) -> Site {
        let corner = (self.width - 1, self.height - 1);
        if corner == start && self.width * self.height > 1 {
            (0, 0)
        } else {
            corner
        }
    }

    /// Rows and columns of the expanded grid, if every one of its cells is
    /// addressable by a [Cell]
    fn grid_dimensions(width: usize, height: usize) -> Option<(usize, usize)> {
        let side = |n: usize| {
            n.checked_mul(2)
                .and_then(|n| n.checked_add(1))
                .filter(|&n| n <= i32::MAX as usize)
        };
        let (rows, cols) = (side(height)?, side(width)?);
        rows.checked_mul(cols)
            .filter(|&len| len <= isize::MAX as usize)
            .map(|_| (rows, cols))
    }

    fn grid_cell((col, row): Site) -> Cell {
        Cell::new((2 * row + 1) as i32, (2 * col + 1) as i32)
    }

    /// Expand into a `(2 * height + 1) x (2 * width + 1)` wall grid
    fn to_grid(&self) -> Result<Grid, MazeError> {
        let (rows, cols) = Self::grid_dimensions(self.width, self.height).ok_or(
            MazeError::InvalidMazeSize {
                width: self.width,
                height: self.height,
            },
        )?;
        let mut grid = Grid::filled(rows, cols, true)?;
        for site in self.sites() {
            let cell = Self::grid_cell(site);
            grid.remove_wall(cell);
            if self.step(site, Wall::East).is_some() && !self.has_wall(site, Wall::East) {
                grid.remove_wall(cell.offset(0, 1));
            }
            if self.step(site, Wall::North).is_some() && !self.has_wall(site, Wall::North) {
                grid.remove_wall(cell.offset(1, 0));
            }
        }
        Ok(grid)
    }
}

/// Outcome of dead-end pruning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Pruning {
    /// Passes started over the maze
    passes: usize,
    /// Dead ends given an extra opening
    opened: usize,
}

/// Seeded maze generator
///
/// The generator owns its random state, so separate generators never
/// influence each other. Successive calls on one generator continue the same
/// random stream.
pub struct MazeGenerator {
    random: ChaCha8Rng,
}

impl MazeGenerator {
    /// Share of internal walls removed at difficulty 1
    const LOOP_FRACTION: f32 = 0.25;
    /// Dead ends are pruned below this difficulty
    const PRUNE_THRESHOLD: f32 = 0.3;
    const PRUNE_PASSES: usize = 2;

    pub fn new(seed: u64) -> Self {
        Self {
            random: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate a maze of `width` x `height` logical cells
    ///
    /// A perfect maze is carved first, then loops are added in proportion to
    /// `difficulty`, and below difficulty 0.3 some dead ends are opened up.
    pub fn generate(
        &mut self,
        width: usize,
        height: usize,
        difficulty: f32,
    ) -> Result<Maze, MazeError> {
        if width == 0 || height == 0 || LogicalMaze::grid_dimensions(width, height).is_none() {
            return Err(MazeError::InvalidMazeSize { width, height });
        }
        let difficulty = if difficulty.is_nan() {
            0.0
        } else {
            difficulty.clamp(0.0, 1.0)
        };

        let (mut cells, start) = self.carve(width, height);
        let loops = self.add_loops(&mut cells, difficulty);
        let pruning = if difficulty < Self::PRUNE_THRESHOLD {
            self.prune_dead_ends(&mut cells, (Self::PRUNE_THRESHOLD - difficulty) * 2.0)
        } else {
            Pruning::default()
        };
        log::debug!(
            "generated {width}x{height} maze: {} passages, {loops} loops, {} dead ends opened in {} passes",
            cells.passages(),
            pruning.opened,
            pruning.passes
        );

        let exit = cells.exit_for(start);
        Ok(Maze {
            grid: cells.to_grid()?,
            start: LogicalMaze::grid_cell(start),
            exit: LogicalMaze::grid_cell(exit),
        })
    }

    /// Carve a perfect maze with an iterative recursive backtracker
    ///
    /// Returns the maze and the site where carving started.
    fn carve(&mut self, width: usize, height: usize) -> (LogicalMaze, Site) {
        let mut maze = LogicalMaze::new(width, height);
        let mut visited = vec![false; width * height];

        let start = (
            self.random.gen_range(0..width),
            self.random.gen_range(0..height),
        );
        visited[maze.index(start)] = true;
        let mut stack = vec![start];

        while let Some(&current) = stack.last() {
            let unvisited: Vec<(Wall, Site)> = Wall::ALL
                .into_iter()
                .filter_map(|wall| maze.step(current, wall).map(|next| (wall, next)))
                .filter(|&(_, next)| !visited[maze.index(next)])
                .collect();

            match unvisited.choose(&mut self.random) {
                Some(&(wall, next)) => {
                    maze.remove_wall(current, wall);
                    visited[maze.index(next)] = true;
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }
        (maze, start)
    }

    /// Knock down random East/North walls to create loops
    ///
    /// A fixed number of samples is drawn; samples that hit an already open
    /// passage are skipped, so the number of new loops is at most the target.
    /// Returns how many walls were actually removed.
    fn add_loops(&mut self, maze: &mut LogicalMaze, difficulty: f32) -> usize {
        let (width, height) = (maze.width, maze.height);
        if width <= 1 && height <= 1 {
            return 0;
        }
        let internal_walls = (width - 1) * height + (height - 1) * width;
        let samples =
            (difficulty * internal_walls as f32 * Self::LOOP_FRACTION).round_ties_even() as usize;

        let mut removed = 0;
        for _ in 0..samples {
            let col = if width > 1 {
                self.random.gen_range(0..width - 1)
            } else {
                0
            };
            let row = if height > 1 {
                self.random.gen_range(0..height - 1)
            } else {
                0
            };

            let mut candidates = Vec::with_capacity(2);
            if col + 1 < width {
                candidates.push(Wall::East);
            }
            if row + 1 < height {
                candidates.push(Wall::North);
            }
            let Some(&wall) = candidates.choose(&mut self.random) else {
                continue;
            };
            if maze.has_wall((col, row), wall) {
                maze.remove_wall((col, row), wall);
                removed += 1;
            }
        }
        removed
    }

    /// Open an extra wall on dead ends with the given probability
    ///
    /// Stops early once a pass finds no dead end or opens nothing.
    /// `probability` must lie in `[0, 1]`.
    fn prune_dead_ends(&mut self, maze: &mut LogicalMaze, probability: f32) -> Pruning {
        let mut pruning = Pruning::default();
        for _ in 0..Self::PRUNE_PASSES {
            pruning.passes += 1;
            let mut dead_ends: Vec<Site> = maze
                .sites()
                .filter(|&site| maze.open_sides(site) == 1)
                .collect();
            if dead_ends.is_empty() {
                break;
            }
            dead_ends.shuffle(&mut self.random);

            let mut changed = false;
            for site in dead_ends {
                if !self.random.gen_bool(probability.into()) {
                    continue;
                }
                let Some(opening) = Wall::ALL
                    .into_iter()
                    .find(|&wall| !maze.has_wall(site, wall))
                else {
                    continue;
                };
                let closed: Vec<Wall> = Wall::ALL
                    .into_iter()
                    .filter(|&wall| wall != opening)
                    .filter(|&wall| maze.step(site, wall).is_some() && maze.has_wall(site, wall))
                    .collect();
                if let Some(&wall) = closed.choose(&mut self.random) {
                    maze.remove_wall(site, wall);
                    changed = true;
                    pruning.opened += 1;
                }
            }
            if !changed {
                break;
            }
        }
        pruning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::compute_distances;

    #[test]
    fn zero_size_is_rejected() {
        let mut gen = MazeGenerator::new(0);
        assert_eq!(
            gen.generate(0, 3, 0.5).unwrap_err(),
            MazeError::InvalidMazeSize {
                width: 0,
                height: 3
            }
        );
        assert!(gen.generate(3, 0, 0.5).is_err());
    }

    #[test]
    fn same_seed_same_maze() {
        for difficulty in [0.0, 0.2, 0.5, 1.0] {
            let a = generate(&MazeConfig::new(9, 6, 1234, difficulty)).unwrap();
            let b = generate(&MazeConfig::new(9, 6, 1234, difficulty)).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn carving_yields_spanning_tree() {
        for seed in 0..20 {
            let mut gen = MazeGenerator::new(seed);
            let (cells, _) = gen.carve(7, 5);
            assert_eq!(cells.passages(), 7 * 5 - 1);

            // Every logical cell is reachable from the first one
            let grid = cells.to_grid().unwrap();
            let field = compute_distances(&grid, Cell::new(1, 1));
            for site in cells.sites() {
                assert!(field.distance_to(LogicalMaze::grid_cell(site)) >= 0);
            }
        }
    }

    #[test]
    fn walls_are_removed_in_pairs() {
        let mut gen = MazeGenerator::new(7);
        let (cells, _) = gen.carve(6, 6);
        for site in cells.sites() {
            for wall in Wall::ALL {
                if let Some(other) = cells.step(site, wall) {
                    assert_eq!(
                        cells.has_wall(site, wall),
                        cells.has_wall(other, wall.opposite())
                    );
                }
            }
        }
    }

    #[test]
    fn loops_never_exceed_target() {
        for seed in 0..10 {
            let mut gen = MazeGenerator::new(seed);
            let (mut cells, _) = gen.carve(4, 4);
            let removed = gen.add_loops(&mut cells, 1.0);
            // round(1.0 * 24 * 0.25) samples; duplicates are skipped
            assert!(removed <= 6);
            assert_eq!(cells.passages(), 15 + removed);
        }
    }

    #[test]
    fn zero_difficulty_adds_no_loops() {
        let mut gen = MazeGenerator::new(3);
        let (mut cells, _) = gen.carve(5, 5);
        let before = cells.clone();
        assert_eq!(gen.add_loops(&mut cells, 0.0), 0);
        assert_eq!(cells, before);
    }

    #[test]
    fn pruning_only_removes_walls() {
        let mut gen = MazeGenerator::new(11);
        let (mut cells, _) = gen.carve(8, 8);
        let dead_ends = |m: &LogicalMaze| m.sites().filter(|&s| m.open_sides(s) == 1).count();
        let before_dead_ends = dead_ends(&cells);
        let before_passages = cells.passages();

        let pruned = gen.prune_dead_ends(&mut cells, 1.0).opened;
        assert!(pruned > 0);
        assert_eq!(cells.passages(), before_passages + pruned);
        assert!(dead_ends(&cells) < before_dead_ends);
    }

    #[test]
    fn zero_probability_prunes_nothing() {
        let mut gen = MazeGenerator::new(11);
        let (mut cells, _) = gen.carve(8, 8);
        let before = cells.clone();
        assert_eq!(gen.prune_dead_ends(&mut cells, 0.0).opened, 0);
        assert_eq!(cells, before);
    }

    #[test]
    fn full_probability_stays_within_pass_limit() {
        for seed in 0..10 {
            let mut gen = MazeGenerator::new(seed);
            let (mut cells, _) = gen.carve(9, 7);
            let before = cells.passages();
            let pruning = gen.prune_dead_ends(&mut cells, 1.0);

            assert!((1..=MazeGenerator::PRUNE_PASSES).contains(&pruning.passes));
            assert_eq!(cells.passages(), before + pruning.opened);
        }
    }

    #[test]
    fn maze_without_dead_ends_stops_after_one_pass() {
        let mut cells = LogicalMaze::new(2, 2);
        cells.remove_wall((0, 0), Wall::East);
        cells.remove_wall((0, 0), Wall::North);
        cells.remove_wall((1, 0), Wall::North);
        cells.remove_wall((0, 1), Wall::East);
        let before = cells.clone();

        let pruning = MazeGenerator::new(0).prune_dead_ends(&mut cells, 1.0);
        assert_eq!(pruning, Pruning { passes: 1, opened: 0 });
        assert_eq!(cells, before);
    }

    #[test]
    fn corridor_dead_ends_cannot_be_opened() {
        // Both ends of a one-wide corridor only border the outside
        let mut gen = MazeGenerator::new(4);
        let (mut cells, _) = gen.carve(1, 5);
        let pruning = gen.prune_dead_ends(&mut cells, 1.0);
        assert_eq!(pruning, Pruning { passes: 1, opened: 0 });
    }

    /// Carve and add loops exactly like [MazeGenerator::generate] does, skipping pruning
    fn unpruned(width: usize, height: usize, seed: u64, difficulty: f32) -> (Grid, usize) {
        let mut gen = MazeGenerator::new(seed);
        let (mut cells, _) = gen.carve(width, height);
        let loops = gen.add_loops(&mut cells, difficulty);
        assert_eq!(cells.passages(), width * height - 1 + loops);
        (cells.to_grid().unwrap(), loops)
    }

    #[test]
    fn no_pruning_at_threshold() {
        for seed in 0..16 {
            let maze = generate(&MazeConfig::new(8, 6, seed, 0.3)).unwrap();
            let (grid, _) = unpruned(8, 6, seed, 0.3);
            assert_eq!(maze.grid, grid, "seed {seed}");
        }
    }

    #[test]
    fn pruning_starts_below_threshold() {
        let pruned_seeds = (0..32)
            .filter(|&seed| {
                let maze = generate(&MazeConfig::new(12, 12, seed, 0.29)).unwrap();
                maze.grid != unpruned(12, 12, seed, 0.29).0
            })
            .count();
        assert!(pruned_seeds > 0);
    }

    #[test]
    fn oversized_maze_is_rejected() {
        let huge = usize::MAX / 2 + 1;
        assert_eq!(
            generate(&MazeConfig::new(huge, 2, 0, 0.5)),
            Err(MazeError::InvalidMazeSize {
                width: huge,
                height: 2
            })
        );
        // 2 * width + 1 grid columns would not fit a Cell coordinate
        let too_wide = i32::MAX as usize / 2 + 1;
        assert!(generate(&MazeConfig::new(too_wide, 1, 0, 0.5)).is_err());
        assert!(generate(&MazeConfig::new(1, too_wide, 0, 0.5)).is_err());
        assert_eq!(LogicalMaze::grid_dimensions(too_wide - 1, 1), Some((3, i32::MAX as usize)));
    }

    #[test]
    fn default_config() {
        let config = MazeConfig::default();
        assert_eq!(config, MazeConfig::new(10, 10, 0, 0.5));
        let maze = generate(&config).unwrap();
        assert_eq!((maze.grid.rows(), maze.grid.cols()), (21, 21));
    }

    #[test]
    fn grid_layout_matches_logical_cells() {
        let maze = generate(&MazeConfig::new(4, 3, 5, 0.4)).unwrap();
        assert_eq!(maze.grid.rows(), 7);
        assert_eq!(maze.grid.cols(), 9);
        for row in 0..7 {
            for col in 0..9 {
                let cell = Cell::new(row, col);
                // Frame and lattice points between cells stay walls
                if row == 0 || col == 0 || row == 6 || col == 8 || (row % 2 == 0 && col % 2 == 0) {
                    assert!(maze.grid.is_wall(cell), "{cell} should be a wall");
                }
                // Logical cells are always floor
                if row % 2 == 1 && col % 2 == 1 {
                    assert!(!maze.grid.is_wall(cell), "{cell} should be floor");
                }
            }
        }
    }

    #[test]
    fn start_and_exit_are_distinct_corners() {
        for seed in 0..30 {
            let maze = generate(&MazeConfig::new(5, 4, seed, 0.5)).unwrap();
            assert_ne!(maze.start, maze.exit);
            assert!(maze.exit == Cell::new(7, 9) || maze.exit == Cell::new(1, 1));
            if maze.start == Cell::new(7, 9) {
                assert_eq!(maze.exit, Cell::new(1, 1));
            }
        }
    }

    #[test]
    fn single_cell_maze() {
        let maze = generate(&MazeConfig::new(1, 1, 0, 1.0)).unwrap();
        assert_eq!((maze.grid.rows(), maze.grid.cols()), (3, 3));
        assert_eq!(maze.start, Cell::new(1, 1));
        assert_eq!(maze.exit, Cell::new(1, 1));
        assert_eq!(maze.grid.open_cells().count(), 1);
    }

    #[test]
    fn difficulty_is_clamped() {
        let high = generate(&MazeConfig::new(6, 6, 9, 5.0)).unwrap();
        let one = generate(&MazeConfig::new(6, 6, 9, 1.0)).unwrap();
        assert_eq!(high, one);

        let low = generate(&MazeConfig::new(6, 6, 9, -2.0)).unwrap();
        let zero = generate(&MazeConfig::new(6, 6, 9, 0.0)).unwrap();
        assert_eq!(low, zero);
    }
}
