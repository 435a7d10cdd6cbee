//! CLI for maze generation

use clap::Parser;
use tilt_maze::{
    generate,
    pathfinding::{Algorithm, Plan},
    MazeConfig,
};

/// Map generator for the tilting-platform maze
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in logical cells
    #[arg(long, default_value_t = 10)]
    width: usize,

    /// Maze height in logical cells
    #[arg(long, default_value_t = 10)]
    height: usize,

    /// Random seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// 0 for long corridors, 1 for many loops
    #[arg(long, default_value_t = 0.5)]
    difficulty: f32,

    /// Thickness of the extra wall border
    #[arg(long, default_value_t = 0)]
    padding: usize,

    /// Overlay the shortest path from start to exit
    #[arg(long)]
    solve: bool,
}

/// Generate a maze, print it
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = MazeConfig::new(args.width, args.height, args.seed, args.difficulty);
    let maze = generate(&config)?.padded(args.padding)?;

    let plan = if args.solve {
        let plan = Plan::search(Algorithm::AStar, &maze.grid, maze.start, maze.exit);
        log::info!("shortest path from {} to {} is {} steps", maze.start, maze.exit, plan.steps());
        plan
    } else {
        Plan::default()
    };
    println!("{}", maze.render(plan.cells()));
    Ok(())
}
