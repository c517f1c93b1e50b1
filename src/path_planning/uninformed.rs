//! Breadth-first and depth-first grid search
//!
//! Baselines for the informed planners. They share the open/closed-set
//! bookkeeping and trace contract with A*, but the first discovery of a
//! cell fixes its parent and cost for good.

use crate::common::{GridCoord, GridPlanner, PlanningResult};
use crate::mapping::GridWorld;
use crate::path_planning::frontier::{FifoFrontier, LifoFrontier};
use crate::path_planning::graph_search::GraphSearch;

pub type BfsSearch<'w> = GraphSearch<'w, FifoFrontier>;
pub type DfsSearch<'w> = GraphSearch<'w, LifoFrontier>;

/// Breadth-first search planner
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsPlanner;

/// Depth-first search planner
#[derive(Debug, Clone, Copy, Default)]
pub struct DfsPlanner;

impl GridPlanner for BfsPlanner {
    type Search<'w> = BfsSearch<'w>;

    fn name(&self) -> &'static str {
        "BFS"
    }

    fn begin<'w>(
        &'w self,
        world: &'w GridWorld,
        start: GridCoord,
        goal: GridCoord,
    ) -> PlanningResult<Self::Search<'w>> {
        world.validate_endpoints(start, goal)?;
        Ok(GraphSearch::new(world, start, goal, None, "[BFS]"))
    }
}

impl GridPlanner for DfsPlanner {
    type Search<'w> = DfsSearch<'w>;

    fn name(&self) -> &'static str {
        "DFS"
    }

    fn begin<'w>(
        &'w self,
        world: &'w GridWorld,
        start: GridCoord,
        goal: GridCoord,
    ) -> PlanningResult<Self::Search<'w>> {
        world.validate_endpoints(start, goal)?;
        Ok(GraphSearch::new(world, start, goal, None, "[DFS]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{IncrementalSearch, PlanningError, SearchStatus};
    use crate::mapping::{maze_world, random_world, MapConfig};
    use crate::evaluation::path_cost;
    use approx::assert_relative_eq;

    fn c(x: i32, y: i32) -> GridCoord {
        GridCoord::new(x, y)
    }

    #[test]
    fn test_bfs_finds_fewest_moves() {
        let world = GridWorld::new(6).unwrap();
        let result = BfsPlanner.plan(&world, c(0, 0), c(5, 2)).unwrap();
        assert_eq!(result.status, SearchStatus::Found);
        // Chebyshev distance 5 => 6 cells
        assert_eq!(result.path.len(), 6);
        assert!(world.is_valid_path(&result.path));
        assert_relative_eq!(result.cost, path_cost(&result.path), epsilon = 1e-9);
    }

    #[test]
    fn test_bfs_first_frontier_order() {
        let world = GridWorld::new(3).unwrap();
        let mut search = BfsPlanner.begin(&world, c(1, 1), c(2, 2)).unwrap();
        search.step();
        search.step();
        // second snapshot holds the start's neighbors in motion-model order
        let snapshot = search.trace().get(1).map(|s| s.frontier.clone()).unwrap();
        assert_eq!(snapshot[..4], [c(2, 1), c(1, 2), c(0, 1), c(1, 0)]);
        assert_eq!(snapshot.len(), 8);
    }

    #[test]
    fn test_dfs_path_is_contiguous() {
        for seed in 0..10 {
            let config = MapConfig { size: 15, obstacle_ratio: 0.3, seed };
            let world = random_world(&config, c(0, 0), c(14, 14)).unwrap();
            let result = DfsPlanner.plan(&world, c(0, 0), c(14, 14)).unwrap();
            assert!(result.is_found());
            assert_eq!(result.path.first(), Some(&c(0, 0)));
            assert_eq!(result.path.last(), Some(&c(14, 14)));
            assert!(world.is_valid_path(&result.path));
            assert_relative_eq!(result.cost, path_cost(&result.path), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_uninformed_search_terminates_without_path() {
        let rows = [[0u8, 1, 0], [1, 1, 0], [0, 0, 0]];
        let world = GridWorld::from_obstacle_rows(3, &rows).unwrap();
        let bfs = BfsPlanner.plan(&world, c(0, 0), c(2, 2)).unwrap();
        let dfs = DfsPlanner.plan(&world, c(0, 0), c(2, 2)).unwrap();
        for result in [bfs, dfs] {
            assert!(result.path.is_empty());
            assert_eq!(result.status, SearchStatus::FrontierExhausted);
            assert_eq!(result.explored_count, 1);
        }
    }

    #[test]
    fn test_maze_solved_by_both() {
        let world = maze_world(21, 5).unwrap();
        let bfs = BfsPlanner.plan(&world, c(1, 1), c(19, 19)).unwrap();
        let dfs = DfsPlanner.plan(&world, c(1, 1), c(19, 19)).unwrap();
        // a perfect maze has exactly one simple path
        assert_eq!(bfs.path, dfs.path);
        assert!(world.is_valid_path(&bfs.path));
    }

    #[test]
    fn test_uninformed_rejects_obstacle_goal() {
        let world = maze_world(5, 0).unwrap();
        assert!(matches!(
            BfsPlanner.plan(&world, c(1, 1), c(0, 0)),
            Err(PlanningError::InvalidEndpoint(_))
        ));
    }
}
