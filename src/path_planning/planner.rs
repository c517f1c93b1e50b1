//! Planner selection by configuration value

use crate::common::{GridCoord, GridPlanner, PlanningResult, SearchResult};
use crate::mapping::GridWorld;
use crate::path_planning::a_star::{AStarConfig, AStarPlanner};
use crate::path_planning::aco::{AcoConfig, AcoPlanner};
use crate::path_planning::rrt::{RrtConfig, RrtPlanner};
use crate::path_planning::uninformed::{BfsPlanner, DfsPlanner};

/// Any planner in this crate, with its configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlannerConfig {
    AStar(AStarConfig),
    Bfs,
    Dfs,
    Rrt(RrtConfig),
    Aco(AcoConfig),
}

impl PlannerConfig {
    /// Every planner with default settings
    pub fn standard_set() -> Vec<PlannerConfig> {
        vec![
            PlannerConfig::AStar(AStarConfig::default()),
            PlannerConfig::Bfs,
            PlannerConfig::Dfs,
            PlannerConfig::Rrt(RrtConfig::default()),
            PlannerConfig::Aco(AcoConfig::default()),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlannerConfig::AStar(_) => "A*",
            PlannerConfig::Bfs => "BFS",
            PlannerConfig::Dfs => "DFS",
            PlannerConfig::Rrt(_) => "RRT",
            PlannerConfig::Aco(_) => "ACO",
        }
    }

    pub fn validate(&self) -> PlanningResult<()> {
        match self {
            PlannerConfig::AStar(config) => config.validate(),
            PlannerConfig::Bfs | PlannerConfig::Dfs => Ok(()),
            PlannerConfig::Rrt(config) => config.validate(),
            PlannerConfig::Aco(config) => config.validate(),
        }
    }

    /// Run the configured planner to completion
    pub fn plan(&self, world: &GridWorld, start: GridCoord, goal: GridCoord) -> PlanningResult<SearchResult> {
        match self {
            PlannerConfig::AStar(config) => AStarPlanner::new(config.clone()).plan(world, start, goal),
            PlannerConfig::Bfs => BfsPlanner.plan(world, start, goal),
            PlannerConfig::Dfs => DfsPlanner.plan(world, start, goal),
            PlannerConfig::Rrt(config) => RrtPlanner::new(config.clone()).plan(world, start, goal),
            PlannerConfig::Aco(config) => AcoPlanner::new(config.clone()).plan(world, start, goal),
        }
    }

    /// Replace the seed of stochastic planners; deterministic ones are unchanged
    pub fn with_seed(self, seed: u64) -> Self {
        match self {
            PlannerConfig::Rrt(config) => PlannerConfig::Rrt(RrtConfig { seed, ..config }),
            PlannerConfig::Aco(config) => PlannerConfig::Aco(AcoConfig { seed, ..config }),
            other => other,
        }
    }
}
