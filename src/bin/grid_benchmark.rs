//! Grid planner benchmark
//!
//! Builds a random obstacle field (or a maze) and runs the selected planners
//! on it, printing cost, turning, path length, explored cells and time.
//!
//! Usage:
//!   cargo run --bin grid_benchmark -- --size 40 --obstacle-ratio 0.35
//!   cargo run --bin grid_benchmark -- --maze --algorithms a-star bfs
//!
//! Enable per-planner logging:
//!   RUST_LOG=debug cargo run --bin grid_benchmark

use clap::{Parser, ValueEnum};

use grid_planning::evaluation::{format_table, run_benchmark};
use grid_planning::mapping::{maze_world, random_world, MapConfig};
use grid_planning::path_planning::{AStarConfig, AcoConfig, Heuristic, PlannerConfig, RrtConfig};
use grid_planning::{GridCoord, GridWorld, PlanningResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    AStar,
    Bfs,
    Dfs,
    Rrt,
    Aco,
}

/// Compare grid path planners on one map
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid side length in cells
    #[arg(short, long, default_value = "25")]
    size: usize,

    /// Obstacle probability for random maps
    #[arg(long, default_value = "0.3")]
    obstacle_ratio: f64,

    /// Seed for the map and the stochastic planners
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Use a perfect maze instead of a random obstacle field
    #[arg(long)]
    maze: bool,

    /// Planners to run
    #[arg(short, long, value_enum, num_args = 1.., default_values_t = vec![Algorithm::AStar, Algorithm::Bfs, Algorithm::Dfs, Algorithm::Rrt, Algorithm::Aco])]
    algorithms: Vec<Algorithm>,

    /// Use the octile heuristic for A* instead of Manhattan
    #[arg(long)]
    octile: bool,

    /// RRT iteration budget
    #[arg(long, default_value = "1000")]
    rrt_iterations: usize,

    /// Ants per ACO iteration
    #[arg(long, default_value = "50")]
    ants: usize,

    /// ACO colony iterations
    #[arg(long, default_value = "100")]
    aco_iterations: usize,
}

fn build_world(args: &Args) -> PlanningResult<(GridWorld, GridCoord, GridCoord)> {
    if args.maze {
        // largest odd coordinate inside the grid; odd cells are always open
        let last = (args.size.saturating_sub(2) | 1) as i32;
        let world = maze_world(args.size, args.seed)?;
        return Ok((world, GridCoord::new(1, 1), GridCoord::new(last, last)));
    }

    let config = MapConfig { size: args.size, obstacle_ratio: args.obstacle_ratio, seed: args.seed };
    let last = args.size.saturating_sub(1) as i32;
    let (start, goal) = (GridCoord::new(0, 0), GridCoord::new(last, last));
    let world = random_world(&config, start, goal)?;
    Ok((world, start, goal))
}

fn planner_config(algorithm: Algorithm, args: &Args) -> PlannerConfig {
    match algorithm {
        Algorithm::AStar => {
            let heuristic = if args.octile { Heuristic::Octile } else { Heuristic::Manhattan };
            PlannerConfig::AStar(AStarConfig { heuristic, ..Default::default() })
        }
        Algorithm::Bfs => PlannerConfig::Bfs,
        Algorithm::Dfs => PlannerConfig::Dfs,
        Algorithm::Rrt => PlannerConfig::Rrt(RrtConfig {
            max_iterations: args.rrt_iterations,
            seed: args.seed,
            ..Default::default()
        }),
        Algorithm::Aco => PlannerConfig::Aco(AcoConfig {
            num_ants: args.ants,
            num_iterations: args.aco_iterations,
            seed: args.seed,
            ..Default::default()
        }),
    }
}

fn run(args: &Args) -> PlanningResult<()> {
    let (world, start, goal) = build_world(args)?;
    println!(
        "{} {}x{} map, {} obstacles, start {} goal {}",
        if args.maze { "Maze" } else { "Random" },
        world.size(),
        world.size(),
        world.obstacle_count(),
        start,
        goal
    );

    let planners: Vec<PlannerConfig> = args.algorithms.iter().map(|&a| planner_config(a, args)).collect();
    let records = run_benchmark(&world, start, goal, &planners)?;
    print!("{}", format_table(&records));
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Benchmark failed: {}", e);
        std::process::exit(1);
    }
}
