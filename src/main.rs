//! CLI for maze generation

use std::io;

use anyhow::Context;
use clap::Parser;
use mazemaker::{GenerateOptions, MazeGenerator};
use tracing_subscriber::EnvFilter;

/// Rectangular maze generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in cells
    #[arg(long, default_value_t = 15)]
    width: usize,

    /// Maze height in cells
    #[arg(long, default_value_t = 19)]
    height: usize,

    /// Extra passages to open after the maze is complete
    #[arg(short, long, default_value_t = 0)]
    loops: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Fail if some of the requested loops could not be placed
    #[arg(long)]
    require_loops: bool,

    /// Log generation details. `RUST_LOG` takes precedence.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Generate maze, print report
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut gen = MazeGenerator::new(args.seed);
    let options = GenerateOptions::default().with_loops(args.loops);
    let maze = gen
        .generate(args.width, args.height, options)
        .with_context(|| format!("Could not generate a {}x{} maze", args.width, args.height))?;
    if args.require_loops {
        maze.ensure_loops_placed()?;
    }

    maze.print_report();
    if let Some(seed) = args.seed {
        println!("Seed: {}", seed);
    }
    Ok(())
}
