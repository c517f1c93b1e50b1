//! RRT (Rapidly-exploring Random Tree) path planning on a grid
//!
//! Sampling-based planner that grows a tree of cells from the start by
//! repeatedly sampling a random cell and stepping the nearest tree node
//! toward it. Paths are feasible but not optimal.

use std::collections::HashSet;

use itertools::Itertools;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{
    GridCoord, GridPlanner, IncrementalSearch, PlanningError, PlanningResult, SearchResult, SearchStatus,
    SearchTrace,
};
use crate::mapping::GridWorld;

/// Configuration for RRT planner
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RrtConfig {
    /// Maximum iterations before giving up
    pub max_iterations: usize,
    /// Expansion distance per step, in cells
    pub step_size: usize,
    /// Goal sampling rate (0-100)
    pub goal_sample_rate: u32,
    pub seed: u64,
}

impl Default for RrtConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            step_size: 1,
            goal_sample_rate: 0,
            seed: 0,
        }
    }
}

impl RrtConfig {
    pub fn validate(&self) -> PlanningResult<()> {
        if self.max_iterations == 0 {
            return Err(PlanningError::config("max_iterations must be > 0"));
        }
        if self.step_size == 0 {
            return Err(PlanningError::config("step_size must be >= 1"));
        }
        if self.goal_sample_rate > 100 {
            return Err(PlanningError::config(format!(
                "goal_sample_rate must be in [0, 100], got {}",
                self.goal_sample_rate
            )));
        }
        Ok(())
    }
}

/// Node of the RRT tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeNode {
    pub coord: GridCoord,
    /// Index of the parent node; `None` only for the root
    pub parent: Option<usize>,
    /// Accumulated move cost from the root
    pub cost: f64,
}

/// Append-only tree of distinct cells
#[derive(Debug, Clone)]
pub struct RrtTree {
    nodes: Vec<TreeNode>,
    members: HashSet<GridCoord>,
}

impl RrtTree {
    pub fn new(root: GridCoord) -> Self {
        let mut members = HashSet::new();
        members.insert(root);
        RrtTree {
            nodes: vec![TreeNode { coord: root, parent: None, cost: 0.0 }],
            members,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn get(&self, index: usize) -> Option<&TreeNode> {
        self.nodes.get(index)
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        self.members.contains(&coord)
    }

    /// Index of the node closest to `target` (Euclidean), first one on ties
    pub fn nearest(&self, target: GridCoord) -> usize {
        self.nodes
            .iter()
            .position_min_by_key(|node| {
                let dx = (node.coord.x - target.x) as i64;
                let dy = (node.coord.y - target.y) as i64;
                dx * dx + dy * dy
            })
            .unwrap_or(0)
    }

    fn push(&mut self, coord: GridCoord, parent: usize, cost: f64) -> usize {
        self.members.insert(coord);
        self.nodes.push(TreeNode { coord, parent: Some(parent), cost });
        self.nodes.len() - 1
    }

    /// Node coordinates from the root down to `index`
    pub fn branch(&self, index: usize) -> Vec<GridCoord> {
        let mut branch = Vec::new();
        let mut node_index = Some(index);
        while let Some(node) = node_index.and_then(|i| self.nodes.get(i)) {
            branch.push(node.coord);
            node_index = node.parent;
        }
        branch.reverse();
        branch
    }
}

/// Cells visited walking from `from` to `to`: diagonal steps first, then
/// straight. Excludes `from`, includes `to`.
fn grid_walk(from: GridCoord, to: GridCoord) -> Vec<GridCoord> {
    let mut cells = Vec::new();
    let mut current = from;
    while current != to {
        current = current.offset((to.x - current.x).signum(), (to.y - current.y).signum());
        cells.push(current);
    }
    cells
}

/// Cost of walking from `from` to `to`, or `None` if any step is not an allowed move
fn walk_cost(world: &GridWorld, from: GridCoord, to: GridCoord) -> Option<f64> {
    let mut cost = 0.0;
    let mut previous = from;
    for next in grid_walk(from, to) {
        if !world.allows_move(previous, next) {
            return None;
        }
        cost += world.move_cost(previous, next);
        previous = next;
    }
    Some(cost)
}

/// RRT search session
pub struct RrtSearch<'w> {
    world: &'w GridWorld,
    config: &'w RrtConfig,
    goal: GridCoord,
    rng: StdRng,
    tree: RrtTree,
    goal_index: Option<usize>,
    trace: SearchTrace,
    iterations: usize,
    status: SearchStatus,
}

impl<'w> RrtSearch<'w> {
    fn new(world: &'w GridWorld, config: &'w RrtConfig, start: GridCoord, goal: GridCoord) -> Self {
        debug!(
            "[RRT] search start={} goal={} grid={} step_size={}",
            start,
            goal,
            world.size(),
            config.step_size
        );
        RrtSearch {
            world,
            config,
            goal,
            rng: StdRng::seed_from_u64(config.seed),
            tree: RrtTree::new(start),
            goal_index: None,
            trace: SearchTrace::new(),
            iterations: 0,
            status: SearchStatus::Running,
        }
    }

    /// The tree grown so far
    pub fn tree(&self) -> &RrtTree {
        &self.tree
    }

    fn sample(&mut self) -> GridCoord {
        if self.rng.gen_range(0..100) < self.config.goal_sample_rate {
            return self.goal;
        }
        let n = self.world.size() as i32;
        GridCoord::new(self.rng.gen_range(0..n), self.rng.gen_range(0..n))
    }

    /// Step from `nearest` toward `sample` by `step_size`, clamped to the grid
    fn steer(&self, nearest: GridCoord, sample: GridCoord) -> GridCoord {
        let dx = (sample.x - nearest.x) as f64;
        let dy = (sample.y - nearest.y) as f64;
        let dist = (dx * dx + dy * dy).sqrt();
        let step = self.config.step_size as f64;
        let max = self.world.size() as i32 - 1;
        GridCoord::new(
            (nearest.x + (dx / dist * step).round() as i32).clamp(0, max),
            (nearest.y + (dy / dist * step).round() as i32).clamp(0, max),
        )
    }

    /// Try to grow the tree toward `sample`. Returns the new node index.
    fn extend(&mut self, sample: GridCoord) -> Option<usize> {
        let nearest_index = self.tree.nearest(sample);
        let nearest = *self.tree.get(nearest_index)?;
        if nearest.coord == sample {
            return None;
        }

        let target = self.steer(nearest.coord, sample);
        if target == nearest.coord || self.tree.contains(target) {
            return None;
        }
        let cost = walk_cost(self.world, nearest.coord, target)?;
        Some(self.tree.push(target, nearest_index, nearest.cost + cost))
    }

    fn connect_goal(&mut self, index: usize) -> Option<usize> {
        let node = *self.tree.get(index)?;
        if node.coord == self.goal {
            return Some(index);
        }
        if node.coord.distance(&self.goal) > self.config.step_size as f64 {
            return None;
        }
        let cost = walk_cost(self.world, node.coord, self.goal)?;
        Some(self.tree.push(self.goal, index, node.cost + cost))
    }

    fn finish(&mut self, status: SearchStatus) -> SearchStatus {
        self.status = status;
        debug!(
            "[RRT] finished {:?} after {} iterations, tree size {}",
            status,
            self.iterations,
            self.tree.len()
        );
        status
    }

    /// Tree branch to the goal with every walk between nodes filled in
    fn densified_path(&self, goal_index: usize) -> Vec<GridCoord> {
        let branch = self.tree.branch(goal_index);
        let mut path = Vec::with_capacity(branch.len());
        if let Some(&root) = branch.first() {
            path.push(root);
        }
        for (&from, &to) in branch.iter().tuple_windows() {
            path.extend(grid_walk(from, to));
        }
        path
    }
}

impl<'w> IncrementalSearch for RrtSearch<'w> {
    fn step(&mut self) -> SearchStatus {
        if self.status.is_finished() {
            return self.status;
        }

        self.trace.record(self.tree.nodes().iter().map(|n| n.coord).collect());
        self.iterations += 1;

        let sample = self.sample();
        if let Some(index) = self.extend(sample) {
            let coord = self.tree.nodes()[index].coord;
            self.trace.mark_expanded(coord);
            trace!("[RRT] iteration {} sample {} added {}", self.iterations, sample, coord);

            if let Some(goal_index) = self.connect_goal(index) {
                self.goal_index = Some(goal_index);
                return self.finish(SearchStatus::Found);
            }
        }

        if self.iterations >= self.config.max_iterations {
            return self.finish(SearchStatus::BudgetExhausted);
        }
        self.status
    }

    fn status(&self) -> SearchStatus {
        self.status
    }

    fn iterations(&self) -> usize {
        self.iterations
    }

    fn trace(&self) -> &SearchTrace {
        &self.trace
    }

    fn into_result(self) -> SearchResult {
        let explored = self.tree.len();
        match (self.status, self.goal_index) {
            (SearchStatus::Found, Some(goal_index)) => {
                let path = self.densified_path(goal_index);
                let cost = self.tree.get(goal_index).map_or(f64::INFINITY, |n| n.cost);
                SearchResult::found(path, cost, self.trace, explored, self.iterations)
            }
            (status, _) => SearchResult::failed(status, self.trace, explored, self.iterations),
        }
    }
}

/// RRT path planner
#[derive(Debug, Clone, Default)]
pub struct RrtPlanner {
    config: RrtConfig,
}

impl RrtPlanner {
    pub fn new(config: RrtConfig) -> Self {
        RrtPlanner { config }
    }

    pub fn config(&self) -> &RrtConfig {
        &self.config
    }
}

impl GridPlanner for RrtPlanner {
    type Search<'w> = RrtSearch<'w>;

    fn name(&self) -> &'static str {
        "RRT"
    }

    fn begin<'w>(
        &'w self,
        world: &'w GridWorld,
        start: GridCoord,
        goal: GridCoord,
    ) -> PlanningResult<Self::Search<'w>> {
        self.config.validate()?;
        world.validate_endpoints(start, goal)?;
        Ok(RrtSearch::new(world, &self.config, start, goal))
    }
}
