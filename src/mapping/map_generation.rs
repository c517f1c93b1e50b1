//! Procedural grid worlds
//!
//! Random obstacle fields that always keep a corridor between two cells
//! open, and perfect mazes carved by a randomized depth-first backtracker.

use std::collections::HashSet;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::{Rng, SeedableRng};

use crate::common::{GridCoord, PlanningError, PlanningResult};
use crate::mapping::GridWorld;

/// Configuration for random obstacle maps
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapConfig {
    /// Grid side length in cells
    pub size: usize,
    /// Probability that a cell off the guaranteed corridor becomes an obstacle
    pub obstacle_ratio: f64,
    /// Seed for the obstacle layout
    pub seed: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            size: 25,
            obstacle_ratio: 0.3,
            seed: 42,
        }
    }
}

impl MapConfig {
    pub fn validate(&self) -> PlanningResult<()> {
        if self.size == 0 {
            return Err(PlanningError::config("map size must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.obstacle_ratio) {
            return Err(PlanningError::config(format!(
                "obstacle_ratio must be in [0, 1], got {}",
                self.obstacle_ratio
            )));
        }
        Ok(())
    }
}

/// Staircase of orthogonal moves from `start` to `goal`, both included
fn staircase_corridor(start: GridCoord, goal: GridCoord) -> Vec<GridCoord> {
    let mut corridor = vec![start];
    let mut current = start;
    while current != goal {
        if current.x != goal.x {
            current = current.offset((goal.x - current.x).signum(), 0);
            corridor.push(current);
        }
        if current.y != goal.y {
            current = current.offset(0, (goal.y - current.y).signum());
            corridor.push(current);
        }
    }
    corridor
}

/// Random obstacle field that keeps an orthogonal corridor from start to goal open
pub fn random_world(config: &MapConfig, start: GridCoord, goal: GridCoord) -> PlanningResult<GridWorld> {
    config.validate()?;
    let mut world = GridWorld::new(config.size)?;
    world.validate_endpoints(start, goal)?;

    let corridor: HashSet<GridCoord> = staircase_corridor(start, goal).into_iter().collect();
    let mut rng = StdRng::seed_from_u64(config.seed);

    let candidates: Vec<GridCoord> = world.coords().collect();
    for coord in candidates {
        // Draw for every cell so the layout off the corridor does not depend on endpoints
        let blocked = rng.gen_bool(config.obstacle_ratio);
        if blocked && !corridor.contains(&coord) {
            world.set_obstacle(coord)?;
        }
    }

    debug!(
        "[MapGen] random world {}x{}: {} obstacles, corridor of {} cells",
        config.size,
        config.size,
        world.obstacle_count(),
        corridor.len()
    );
    Ok(world)
}

/// Perfect maze: every odd-coordinate cell is open and all of them are connected
///
/// Walls fill the even rows and columns except where the backtracker
/// knocked through. Corridors are one cell wide and orthogonal.
pub fn maze_world(size: usize, seed: u64) -> PlanningResult<GridWorld> {
    if size < 3 {
        return Err(PlanningError::config(format!("maze size must be >= 3, got {}", size)));
    }

    let rows = vec![vec![1u8; size]; size];
    let mut world = GridWorld::from_obstacle_rows(size, &rows)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let origin = GridCoord::new(1, 1);
    let mut visited = HashSet::new();
    let mut stack = vec![origin];
    visited.insert(origin);
    world.clear_obstacle(origin)?;

    while let Some(&current) = stack.last() {
        let unvisited: Vec<(i32, i32)> = [(0, 2), (2, 0), (0, -2), (-2, 0)]
            .into_iter()
            .filter(|&(dx, dy)| {
                let next = current.offset(dx, dy);
                world.in_bounds(next) && !visited.contains(&next)
            })
            .collect();

        match unvisited.choose(&mut rng) {
            Some(&(dx, dy)) => {
                let next = current.offset(dx, dy);
                world.clear_obstacle(current.offset(dx / 2, dy / 2))?;
                world.clear_obstacle(next)?;
                visited.insert(next);
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }

    debug!("[MapGen] maze {}x{}: {} open cells", size, size, world.cell_count() - world.obstacle_count());
    Ok(world)
}

/// Uniformly random traversable cell
pub fn random_free_cell<R: Rng + ?Sized>(world: &GridWorld, rng: &mut R) -> Option<GridCoord> {
    world.traversable_cells().choose(rng)
}

/// Two distinct random traversable cells, in random order
pub fn random_endpoints<R: Rng + ?Sized>(world: &GridWorld, rng: &mut R) -> Option<(GridCoord, GridCoord)> {
    let mut picked = world.traversable_cells().choose_multiple(rng, 2);
    if picked.len() < 2 {
        return None;
    }
    picked.shuffle(rng);
    Some((picked[0], picked[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn reachable(world: &GridWorld, from: GridCoord) -> HashSet<GridCoord> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(from);
        queue.push_back(from);
        while let Some(c) = queue.pop_front() {
            for n in world.neighbors(c) {
                if seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen
    }

    #[test]
    fn test_map_config_validate() {
        assert!(MapConfig::default().validate().is_ok());
        let bad = MapConfig { obstacle_ratio: 1.5, ..Default::default() };
        assert!(bad.validate().is_err());
        let empty = MapConfig { size: 0, ..Default::default() };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_staircase_corridor_is_orthogonal() {
        let corridor = staircase_corridor(GridCoord::new(0, 0), GridCoord::new(3, -2));
        assert_eq!(corridor.first(), Some(&GridCoord::new(0, 0)));
        assert_eq!(corridor.last(), Some(&GridCoord::new(3, -2)));
        assert!(corridor.windows(2).all(|w| w[0].manhattan(&w[1]) == 1));
    }

    #[test]
    fn test_random_world_keeps_goal_reachable() {
        for seed in 0..10 {
            let config = MapConfig { size: 20, obstacle_ratio: 0.6, seed };
            let start = GridCoord::new(0, 0);
            let goal = GridCoord::new(17, 11);
            let world = random_world(&config, start, goal).unwrap();
            assert!(world.obstacle_count() > 0);
            assert!(reachable(&world, start).contains(&goal));
        }
    }

    #[test]
    fn test_random_world_is_seeded() {
        let config = MapConfig::default();
        let a = random_world(&config, GridCoord::new(0, 0), GridCoord::new(24, 24)).unwrap();
        let b = random_world(&config, GridCoord::new(0, 0), GridCoord::new(24, 24)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_world_rejects_bad_endpoints() {
        let config = MapConfig { size: 5, ..Default::default() };
        let p = GridCoord::new(2, 2);
        assert!(matches!(random_world(&config, p, p), Err(PlanningError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_maze_connects_all_rooms() {
        let world = maze_world(15, 3).unwrap();
        let rooms = reachable(&world, GridCoord::new(1, 1));
        for x in (1..15).step_by(2) {
            for y in (1..15).step_by(2) {
                assert!(rooms.contains(&GridCoord::new(x, y)), "room ({}, {}) unreachable", x, y);
            }
        }
        assert!(world.is_obstacle(GridCoord::new(0, 0)));
    }

    #[test]
    fn test_maze_too_small() {
        assert!(maze_world(2, 0).is_err());
    }

    #[test]
    fn test_random_free_cell() {
        let rows = [[1u8, 1], [1, 0]];
        let world = GridWorld::from_obstacle_rows(2, &rows).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_free_cell(&world, &mut rng), Some(GridCoord::new(1, 1)));
        assert_eq!(random_endpoints(&world, &mut rng), None);

        let blocked = GridWorld::from_obstacle_rows(2, &[[1u8, 1], [1, 1]]).unwrap();
        assert_eq!(random_free_cell(&blocked, &mut rng), None);
    }

    #[test]
    fn test_random_endpoints_distinct() {
        let world = GridWorld::new(6).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            let (a, b) = random_endpoints(&world, &mut rng).unwrap();
            assert_ne!(a, b);
        }
    }
}
