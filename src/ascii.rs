//! Plain-text maze maps
//!
//! One character per cell: `#` is a wall, space or `.` is floor, `B` marks
//! the ball start and `E` the exit. Rendering adds `*` for cells of a plan.

use std::collections::HashSet;

use itertools::Itertools;

use crate::{Cell, Grid, MazeError};

const S_WALL: char = '#';
const S_FLOOR: char = ' ';
const S_FLOOR_ALT: char = '.';
const S_START: char = 'B';
const S_EXIT: char = 'E';
const S_PATH: char = '*';

/// Grid and markers read from a text map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiMap {
    pub grid: Grid,
    pub start: Option<Cell>,
    pub exit: Option<Cell>,
}

/// Parse a text map
///
/// Blank lines are skipped. The first row sets the width; shorter rows are
/// padded with walls and longer rows cut off. Unknown characters become
/// walls. If `B` or `E` occur more than once the last one counts.
///
/// # Examples
/// ```
/// use tilt_maze::{ascii, Cell};
///
/// let map = ascii::parse("#####\n#B E#\n#####").unwrap();
/// assert_eq!(map.start, Some(Cell::new(1, 1)));
/// assert_eq!(map.exit, Some(Cell::new(1, 3)));
/// assert!(map.grid.is_wall(Cell::new(0, 0)));
/// ```
pub fn parse(text: &str) -> Result<AsciiMap, MazeError> {
    let lines: Vec<Vec<char>> = text
        .lines()
        .map(|line| line.replace('\r', ""))
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().collect())
        .collect();
    let width = lines.first().ok_or(MazeError::EmptyMap)?.len();

    let mut start = None;
    let mut exit = None;
    let mut rows = Vec::with_capacity(lines.len());
    for (r, line) in lines.iter().enumerate() {
        if line.len() != width {
            log::warn!(
                "row {r} has {} cells, expected {width}; missing cells become walls",
                line.len()
            );
        }
        let mut row = Vec::with_capacity(width);
        for (c, &symbol) in line.iter().take(width).enumerate() {
            let cell = Cell::new(r as i32, c as i32);
            let wall = match symbol {
                S_WALL => true,
                S_FLOOR | S_FLOOR_ALT => false,
                S_START => {
                    if start.replace(cell).is_some() {
                        log::warn!("multiple start markers, using {cell}");
                    }
                    false
                }
                S_EXIT => {
                    if exit.replace(cell).is_some() {
                        log::warn!("multiple exit markers, using {cell}");
                    }
                    false
                }
                other => {
                    log::warn!("unknown symbol `{other}` at {cell}, treating as wall");
                    true
                }
            };
            row.push(wall);
        }
        rows.push(row);
    }

    if start.is_none() {
        log::warn!("map has no start marker `{S_START}`");
    }
    Ok(AsciiMap {
        grid: Grid::from_rows(rows)?,
        start,
        exit,
    })
}

/// Render `grid` as text, marking start, exit and the cells of `path`
///
/// Markers outside the grid are ignored.
pub fn render(grid: &Grid, start: Option<Cell>, exit: Option<Cell>, path: &[Cell]) -> String {
    let on_path: HashSet<Cell> = path.iter().copied().collect();
    (0..grid.rows() as i32)
        .map(|r| {
            (0..grid.cols() as i32)
                .map(|c| {
                    let cell = Cell::new(r, c);
                    if Some(cell) == start {
                        S_START
                    } else if Some(cell) == exit {
                        S_EXIT
                    } else if grid.is_wall(cell) {
                        S_WALL
                    } else if on_path.contains(&cell) {
                        S_PATH
                    } else {
                        S_FLOOR
                    }
                })
                .join("")
        })
        .join("\n")
}
