//! A* path planning over a grid world
//!
//! Best-first search ordered by `f = g + w·h`, ties broken by insertion
//! order so repeated runs expand cells in exactly the same sequence.
//! Every iteration records the open set before popping, giving a
//! step-by-step replay in the result's trace.

use std::f64::consts::SQRT_2;

use crate::common::{GridCoord, GridPlanner, PlanningError, PlanningResult};
use crate::mapping::GridWorld;
use crate::path_planning::frontier::PriorityFrontier;
use crate::path_planning::graph_search::GraphSearch;

/// Distance estimate from a cell to the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// |dx| + |dy|. Overestimates diagonal routes, so the search is greedy
    /// toward the goal and not guaranteed optimal when obstacles intervene.
    #[default]
    Manhattan,
    /// Exact cost on an open 8-connected grid; admissible
    Octile,
    /// Straight-line distance; admissible
    Euclidean,
}

impl Heuristic {
    pub fn estimate(&self, from: GridCoord, to: GridCoord) -> f64 {
        let dx = (from.x - to.x).abs() as f64;
        let dy = (from.y - to.y).abs() as f64;
        match self {
            Heuristic::Manhattan => dx + dy,
            Heuristic::Octile => {
                let d_min = dx.min(dy);
                let d_max = dx.max(dy);
                d_min * SQRT_2 + (d_max - d_min)
            }
            Heuristic::Euclidean => (dx * dx + dy * dy).sqrt(),
        }
    }
}

/// Configuration for A* planner
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AStarConfig {
    pub heuristic: Heuristic,
    /// Heuristic weight (1.0 = plain A*, 0.0 = uniform-cost search)
    pub heuristic_weight: f64,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::Manhattan,
            heuristic_weight: 1.0,
        }
    }
}

impl AStarConfig {
    pub fn validate(&self) -> PlanningResult<()> {
        if !self.heuristic_weight.is_finite() || self.heuristic_weight < 0.0 {
            return Err(PlanningError::config(format!(
                "heuristic_weight must be finite and >= 0, got {}",
                self.heuristic_weight
            )));
        }
        Ok(())
    }
}

/// A* search session
pub type AStarSearch<'w> = GraphSearch<'w, PriorityFrontier>;

/// A* path planner
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner {
    config: AStarConfig,
}

impl AStarPlanner {
    pub fn new(config: AStarConfig) -> Self {
        AStarPlanner { config }
    }

    pub fn with_heuristic(heuristic: Heuristic) -> Self {
        Self::new(AStarConfig { heuristic, ..Default::default() })
    }

    pub fn config(&self) -> &AStarConfig {
        &self.config
    }
}

impl GridPlanner for AStarPlanner {
    type Search<'w> = AStarSearch<'w>;

    fn name(&self) -> &'static str {
        "A*"
    }

    fn begin<'w>(
        &'w self,
        world: &'w GridWorld,
        start: GridCoord,
        goal: GridCoord,
    ) -> PlanningResult<Self::Search<'w>> {
        self.config.validate()?;
        world.validate_endpoints(start, goal)?;
        Ok(GraphSearch::new(
            world,
            start,
            goal,
            Some((self.config.heuristic, self.config.heuristic_weight)),
            "[AStar]",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{IncrementalSearch, SearchStatus};
    use crate::mapping::{random_world, MapConfig};
    use approx::assert_relative_eq;

    fn c(x: i32, y: i32) -> GridCoord {
        GridCoord::new(x, y)
    }

    fn wall_world() -> GridWorld {
        // Column x = 2 is solid
        let rows: Vec<Vec<u8>> = (0..5).map(|x| vec![u8::from(x == 2); 5]).collect();
        GridWorld::from_obstacle_rows(5, &rows).unwrap()
    }

    #[test]
    fn test_heuristic_values() {
        let a = c(0, 0);
        let b = c(3, 4);
        assert_eq!(Heuristic::Manhattan.estimate(a, b), 7.0);
        assert_relative_eq!(Heuristic::Octile.estimate(a, b), 3.0 * SQRT_2 + 1.0);
        assert_relative_eq!(Heuristic::Euclidean.estimate(a, b), 5.0);
    }

    #[test]
    fn test_a_star_open_grid_diagonal() {
        let world = GridWorld::new(5).unwrap();
        let result = AStarPlanner::default().plan(&world, c(0, 0), c(4, 4)).unwrap();

        assert_eq!(result.status, SearchStatus::Found);
        assert_eq!(result.path.len(), 5);
        assert_eq!(result.path.first(), Some(&c(0, 0)));
        assert_eq!(result.path.last(), Some(&c(4, 4)));
        assert_relative_eq!(result.cost, 4.0 * SQRT_2, epsilon = 1e-9);
        assert!(result.explored_count <= 25);
        assert!(world.is_valid_path(&result.path));
    }

    #[test]
    fn test_a_star_corner_to_corner_cost() {
        for n in 2..12 {
            let world = GridWorld::new(n).unwrap();
            let goal = c(n as i32 - 1, n as i32 - 1);
            let result = AStarPlanner::default().plan(&world, c(0, 0), goal).unwrap();
            assert_relative_eq!(result.cost, (n - 1) as f64 * SQRT_2, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_a_star_trace_has_one_snapshot_per_iteration() {
        let world = GridWorld::new(6).unwrap();
        let result = AStarPlanner::default().plan(&world, c(0, 5), c(5, 0)).unwrap();
        assert_eq!(result.trace.len(), result.iterations);
        assert_eq!(result.trace.get(0).map(|s| s.frontier.clone()), Some(vec![c(0, 5)]));
        assert_eq!(result.trace.last().and_then(|s| s.expanded), Some(c(5, 0)));
    }

    #[test]
    fn test_a_star_no_path_is_not_an_error() {
        let world = wall_world();
        let result = AStarPlanner::default().plan(&world, c(0, 0), c(4, 4)).unwrap();
        assert!(!result.is_found());
        assert_eq!(result.status, SearchStatus::FrontierExhausted);
        // everything left of the wall
        assert_eq!(result.explored_count, 10);
        assert_eq!(result.iterations, 10);
    }

    #[test]
    fn test_a_star_rejects_bad_endpoints() {
        let world = wall_world();
        let planner = AStarPlanner::default();
        assert!(matches!(
            planner.plan(&world, c(2, 0), c(4, 4)),
            Err(PlanningError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            planner.plan(&world, c(0, 0), c(0, 0)),
            Err(PlanningError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_a_star_rejects_bad_weight() {
        let world = GridWorld::new(3).unwrap();
        let planner = AStarPlanner::new(AStarConfig { heuristic_weight: -1.0, ..Default::default() });
        assert!(matches!(
            planner.plan(&world, c(0, 0), c(2, 2)),
            Err(PlanningError::Configuration(_))
        ));
    }

    #[test]
    fn test_a_star_is_idempotent() {
        let config = MapConfig { size: 30, obstacle_ratio: 0.35, seed: 11 };
        let world = random_world(&config, c(0, 0), c(29, 29)).unwrap();
        let planner = AStarPlanner::default();

        let first = planner.plan(&world, c(0, 0), c(29, 29)).unwrap();
        let second = planner.plan(&world, c(0, 0), c(29, 29)).unwrap();
        assert_eq!(first.path, second.path);
        assert_eq!(first.cost, second.cost);
        assert_eq!(first.trace, second.trace);
    }

    #[test]
    fn test_octile_a_star_matches_uniform_cost_search() {
        for seed in 0..8 {
            let config = MapConfig { size: 20, obstacle_ratio: 0.3, seed };
            let world = random_world(&config, c(0, 0), c(19, 13)).unwrap();

            let octile = AStarPlanner::with_heuristic(Heuristic::Octile)
                .plan(&world, c(0, 0), c(19, 13))
                .unwrap();
            let dijkstra = AStarPlanner::new(AStarConfig { heuristic_weight: 0.0, ..Default::default() })
                .plan(&world, c(0, 0), c(19, 13))
                .unwrap();

            assert!(octile.is_found());
            assert_relative_eq!(octile.cost, dijkstra.cost, epsilon = 1e-9);
            assert!(octile.explored_count <= dijkstra.explored_count);
        }
    }

    #[test]
    fn test_a_star_detours_around_obstacle() {
        let mut world = GridWorld::new(5).unwrap();
        for y in 0..4 {
            world.set_obstacle(c(2, y)).unwrap();
        }
        let result = AStarPlanner::default().plan(&world, c(0, 0), c(4, 0)).unwrap();
        assert!(result.is_found());
        assert!(world.is_valid_path(&result.path));
        assert!(result.path.contains(&c(2, 4)));
    }

    #[test]
    fn test_a_star_step_by_step() {
        let world = GridWorld::new(4).unwrap();
        let planner = AStarPlanner::default();
        let mut search = planner.begin(&world, c(0, 0), c(3, 3)).unwrap();

        assert_eq!(search.status(), SearchStatus::Running);
        assert_eq!(search.step(), SearchStatus::Running);
        assert_eq!(search.iterations(), 1);
        assert!(search.is_closed(c(0, 0)));
        assert_eq!(search.node(c(1, 1)).and_then(|n| n.parent), Some(c(0, 0)));

        while !search.step().is_finished() {}
        let iterations = search.iterations();
        // finished sessions ignore further steps
        assert_eq!(search.step(), SearchStatus::Found);
        assert_eq!(search.iterations(), iterations);

        let result = search.into_result();
        assert_eq!(result.path, vec![c(0, 0), c(1, 1), c(2, 2), c(3, 3)]);
    }

    #[test]
    fn test_unfinished_session_yields_empty_result() {
        let world = GridWorld::new(8).unwrap();
        let planner = AStarPlanner::default();
        let mut search = planner.begin(&world, c(0, 0), c(7, 7)).unwrap();
        search.step();
        let result = search.into_result();
        assert!(result.path.is_empty());
        assert_eq!(result.status, SearchStatus::Running);
        assert_eq!(result.iterations, 1);
    }
}
