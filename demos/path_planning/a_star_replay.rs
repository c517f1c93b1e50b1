//! A* Replay Example
//!
//! Steps an A* search one iteration at a time on a small map and prints the
//! frontier as the search unfolds, then draws the final path.

use grid_planning::mapping::GridWorld;
use grid_planning::path_planning::{AStarConfig, AStarPlanner, Heuristic};
use grid_planning::{GridCoord, GridPlanner, IncrementalSearch};

fn render(world: &GridWorld, path: &[GridCoord], start: GridCoord, goal: GridCoord) -> String {
    let n = world.size() as i32;
    let mut out = String::new();
    for y in (0..n).rev() {
        for x in 0..n {
            let c = GridCoord::new(x, y);
            let ch = if c == start {
                'S'
            } else if c == goal {
                'G'
            } else if world.is_obstacle(c) {
                '#'
            } else if path.contains(&c) {
                '*'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

fn main() {
    println!("A* replay start!!");

    let rows = [
        [0u8, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 1, 1, 1, 1, 0, 0],
        [0, 0, 0, 0, 0, 1, 0, 0],
        [0, 0, 0, 0, 0, 1, 0, 0],
        [0, 1, 1, 1, 0, 1, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
    ];
    let world = match GridWorld::from_obstacle_rows(8, &rows) {
        Ok(world) => world,
        Err(e) => {
            println!("Bad map: {}", e);
            return;
        }
    };
    let start = GridCoord::new(0, 0);
    let goal = GridCoord::new(7, 7);

    let planner = AStarPlanner::new(AStarConfig { heuristic: Heuristic::Octile, ..Default::default() });
    let mut search = match planner.begin(&world, start, goal) {
        Ok(search) => search,
        Err(e) => {
            println!("Planning failed: {}", e);
            return;
        }
    };

    while !search.step().is_finished() {
        if let Some(snapshot) = search.trace().last() {
            println!(
                "iteration {:>3}: expanded {:?}, frontier {} cells",
                search.iterations(),
                snapshot.expanded,
                snapshot.frontier.len()
            );
        }
    }

    let result = search.into_result();
    println!("Status: {:?}", result.status);
    println!("Path cost {:.3} over {} cells, {} cells explored", result.cost, result.path.len(), result.explored_count);
    println!("Largest frontier: {} cells", result.trace.max_frontier_len());
    print!("{}", render(&world, &result.path, start, goal));

    println!("A* replay finish!!");
}
