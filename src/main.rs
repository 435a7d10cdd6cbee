//! CLI for maze solving

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    thread,
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use tilt_maze::{
    ascii,
    pathfinding::{Algorithm, Plan},
};

/// Find the ball's way from `B` to `E` in a text maze
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Search algorithm
    #[arg(short, long, value_enum, default_value_t = Algorithm::AStar)]
    algorithm: Algorithm,

    /// Animate the ball along the plan
    #[arg(short, long)]
    playback: bool,

    /// Playback frame length in milliseconds
    #[arg(short, long, default_value_t = 200)]
    frame_length: u64,

    /// File, where to read the maze. Use `-` for stdin.
    file: PathBuf,
}

/// Read maze from file, print the plan
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let text = if args.file.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.file)
            .with_context(|| format!("failed to read {}", args.file.display()))?
    };
    let map = ascii::parse(&text)?;

    let start = map
        .start
        .or_else(|| map.grid.first_open_cell())
        .context("maze has no open cell to start from")?;
    let exit = map
        .exit
        .or_else(|| map.grid.last_open_cell())
        .context("maze has no open cell to exit from")?;

    let mut plan = Plan::search(args.algorithm, &map.grid, start, exit);
    if plan.is_empty() {
        println!("There is no way from {start} to {exit}.");
        return Ok(());
    }

    if args.playback {
        let mut walked = Vec::with_capacity(plan.len());
        while let Some(cell) = plan.next_waypoint() {
            walked.push(cell);
            print!("\x1B[2J\x1B[1;1H");
            println!("{}", ascii::render(&map.grid, Some(cell), Some(exit), &walked));
            if plan.is_finished() {
                break;
            }
            thread::sleep(Duration::from_millis(args.frame_length));
        }
    } else {
        println!("{}", ascii::render(&map.grid, Some(start), Some(exit), plan.cells()));
    }
    println!("The shortest path is {} steps.", plan.steps());
    Ok(())
}
