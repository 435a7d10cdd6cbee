//! A* search on the 4-connected grid

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::{Cell, Grid};

/// Entry of the open set
///
/// Field order gives the expansion order: lowest `f` first, then lowest `h`,
/// i.e. cells believed closer to the goal win ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    g: u32,
    cell: Cell,
}

/// Find a shortest path from `start` to `goal`
///
/// The path includes both end points. An empty path means the goal cannot be
/// reached, which is an ordinary outcome on mazes with closed-off regions.
/// Walls and cells outside the grid are never entered.
///
/// # Examples
/// ```
/// use tilt_maze::{Cell, Grid};
/// use tilt_maze::pathfinding::astar;
///
/// let mut grid = Grid::new(3, 3).unwrap();
/// grid.add_wall(Cell::new(1, 0));
/// grid.add_wall(Cell::new(1, 1));
/// let path = astar::find_path(&grid, Cell::new(0, 0), Cell::new(2, 0));
/// assert_eq!(path.len(), 7);
/// ```
pub fn find_path(grid: &Grid, start: Cell, goal: Cell) -> Vec<Cell> {
    if start == goal {
        return vec![start];
    }

    let mut open = BinaryHeap::new();
    let mut closed = HashSet::new();
    let mut g_score = HashMap::from([(start, 0u32)]);
    let mut came_from: HashMap<Cell, Cell> = HashMap::new();

    let h = start.manhattan(goal);
    open.push(Reverse(OpenNode {
        f: h,
        h,
        g: 0,
        cell: start,
    }));

    while let Some(Reverse(OpenNode { g, cell: current, .. })) = open.pop() {
        // Superseded entries of already expanded cells
        if !closed.insert(current) {
            continue;
        }
        if current == goal {
            return retrace(&came_from, start, goal);
        }

        for next in current.neighbors() {
            if grid.is_wall(next) || closed.contains(&next) {
                continue;
            }
            let tentative = g + 1;
            if g_score.get(&next).is_some_and(|&known| known <= tentative) {
                continue;
            }
            g_score.insert(next, tentative);
            came_from.insert(next, current);
            let h = next.manhattan(goal);
            open.push(Reverse(OpenNode {
                f: tentative + h,
                h,
                g: tentative,
                cell: next,
            }));
        }
    }

    Vec::new()
}

/// Follow parent links from `goal` back to `start`
fn retrace(came_from: &HashMap<Cell, Cell>, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}
