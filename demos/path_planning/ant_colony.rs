//! Ant Colony Optimization Example
//!
//! Runs a colony on a random obstacle field and reports how the best path
//! cost improves over the iterations.

use grid_planning::evaluation::path_deviation;
use grid_planning::mapping::{random_world, MapConfig};
use grid_planning::path_planning::{AcoConfig, AcoPlanner};
use grid_planning::{GridCoord, GridPlanner, IncrementalSearch};

fn main() {
    env_logger::init();
    println!("Ant colony path planning start!!");

    let map_config = MapConfig { size: 20, obstacle_ratio: 0.25, seed: 7 };
    let start = GridCoord::new(0, 0);
    let goal = GridCoord::new(19, 19);
    let world = match random_world(&map_config, start, goal) {
        Ok(world) => world,
        Err(e) => {
            println!("Map generation failed: {}", e);
            return;
        }
    };
    println!("Map {}x{} with {} obstacles", world.size(), world.size(), world.obstacle_count());

    let planner = AcoPlanner::new(AcoConfig { num_ants: 30, num_iterations: 40, seed: 7, ..Default::default() });
    let mut search = match planner.begin(&world, start, goal) {
        Ok(search) => search,
        Err(e) => {
            println!("Planning failed: {}", e);
            return;
        }
    };

    while !search.step().is_finished() {
        if let Some(report) = search.reports().last() {
            println!(
                "iteration {:>3}: {:>2} ants reached the goal, iteration best {:>7.2}, overall best {:>7.2}",
                search.iterations(),
                report.successful.len(),
                report.best.as_ref().map_or(f64::INFINITY, |b| b.cost),
                search.best().map_or(f64::INFINITY, |b| b.cost)
            );
        }
    }

    let (result, _reports, pheromones) = search.into_parts();
    match pheromones.bounds() {
        Some((min, max)) => println!("Pheromone range over {} edges: {:.2e} .. {:.3}", pheromones.len(), min, max),
        None => println!("No traversable edges"),
    }
    if result.is_found() {
        println!(
            "Best path: cost {:.2}, {} cells, turning {:.2} rad",
            result.cost,
            result.path.len(),
            path_deviation(&result.path)
        );
    } else {
        println!("No ant reached the goal ({:?})", result.status);
    }

    println!("Ant colony path planning finish!!");
}
