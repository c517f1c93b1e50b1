//! Shared open/closed-set search over a grid world
//!
//! One session type drives A*, BFS and DFS. Per-search state (g/f scores,
//! parents, closed set) lives here and is dropped with the session, so the
//! world itself is never written to.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::common::{GridCoord, IncrementalSearch, SearchResult, SearchStatus, SearchTrace};
use crate::mapping::GridWorld;
use crate::path_planning::a_star::Heuristic;
use crate::path_planning::frontier::Frontier;

/// Transient per-cell search state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchNode {
    /// Cost of the best known route from start
    pub g_score: f64,
    /// `g_score` plus weighted heuristic (equals `g_score` for uninformed search)
    pub f_score: f64,
    pub parent: Option<GridCoord>,
}

/// A search session over a frontier policy `F`
pub struct GraphSearch<'w, F: Frontier> {
    world: &'w GridWorld,
    start: GridCoord,
    goal: GridCoord,
    heuristic: Option<(Heuristic, f64)>,
    tag: &'static str,
    frontier: F,
    nodes: HashMap<GridCoord, SearchNode>,
    closed: HashSet<GridCoord>,
    trace: SearchTrace,
    iterations: usize,
    status: SearchStatus,
}

impl<'w, F: Frontier> GraphSearch<'w, F> {
    /// Start a session. Endpoints must already be validated against `world`.
    pub(crate) fn new(
        world: &'w GridWorld,
        start: GridCoord,
        goal: GridCoord,
        heuristic: Option<(Heuristic, f64)>,
        tag: &'static str,
    ) -> Self {
        let mut search = GraphSearch {
            world,
            start,
            goal,
            heuristic,
            tag,
            frontier: F::default(),
            nodes: HashMap::new(),
            closed: HashSet::new(),
            trace: SearchTrace::new(),
            iterations: 0,
            status: SearchStatus::Running,
        };

        let f_start = search.estimate(start);
        search.nodes.insert(start, SearchNode { g_score: 0.0, f_score: f_start, parent: None });
        search.frontier.push(start, f_start);

        debug!("{} search start={} goal={} grid={}", tag, start, goal, world.size());
        search
    }

    fn estimate(&self, coord: GridCoord) -> f64 {
        match self.heuristic {
            Some((heuristic, weight)) => weight * heuristic.estimate(coord, self.goal),
            None => 0.0,
        }
    }

    pub fn start(&self) -> GridCoord {
        self.start
    }

    pub fn goal(&self) -> GridCoord {
        self.goal
    }

    /// Search state of a discovered cell
    pub fn node(&self, coord: GridCoord) -> Option<&SearchNode> {
        self.nodes.get(&coord)
    }

    pub fn is_closed(&self, coord: GridCoord) -> bool {
        self.closed.contains(&coord)
    }

    pub fn closed_count(&self) -> usize {
        self.closed.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    fn reconstruct_path(&self) -> Vec<GridCoord> {
        let mut path = vec![self.goal];
        let mut current = self.goal;
        while let Some(parent) = self.nodes.get(&current).and_then(|n| n.parent) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    fn finish(&mut self, status: SearchStatus) -> SearchStatus {
        self.status = status;
        debug!(
            "{} finished {:?} after {} iterations, {} cells closed",
            self.tag, status, self.iterations, self.closed.len()
        );
        status
    }

    fn expand(&mut self, current: GridCoord) {
        self.closed.insert(current);
        let g_current = self.nodes.get(&current).map_or(0.0, |n| n.g_score);

        for next in self.world.neighbors(current) {
            if self.closed.contains(&next) {
                continue;
            }
            let tentative = g_current + self.world.move_cost(current, next);

            if F::RELAXES {
                let known = self.nodes.get(&next).map_or(f64::INFINITY, |n| n.g_score);
                if tentative < known {
                    let f_score = tentative + self.estimate(next);
                    self.nodes.insert(next, SearchNode { g_score: tentative, f_score, parent: Some(current) });
                    self.frontier.push(next, f_score);
                }
            } else if !self.nodes.contains_key(&next) {
                self.nodes.insert(next, SearchNode { g_score: tentative, f_score: tentative, parent: Some(current) });
                self.frontier.push(next, tentative);
            }
        }
    }
}

impl<'w, F: Frontier> IncrementalSearch for GraphSearch<'w, F> {
    fn step(&mut self) -> SearchStatus {
        if self.status.is_finished() {
            return self.status;
        }

        if self.frontier.is_empty() {
            return self.finish(SearchStatus::FrontierExhausted);
        }
        self.trace.record(self.frontier.snapshot());

        let current = match self.frontier.pop() {
            Some(coord) => coord,
            None => return self.finish(SearchStatus::FrontierExhausted),
        };
        self.iterations += 1;
        self.trace.mark_expanded(current);
        trace!("{} iteration {} expanding {}", self.tag, self.iterations, current);

        if current == self.goal {
            return self.finish(SearchStatus::Found);
        }

        self.expand(current);
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
        if self.status != SearchStatus::Found {
            return SearchResult::failed(self.status, self.trace, self.closed.len(), self.iterations);
        }

        let path = self.reconstruct_path();
        let cost = self.nodes.get(&self.goal).map_or(f64::INFINITY, |n| n.g_score);
        SearchResult::found(path, cost, self.trace, self.closed.len() + 1, self.iterations)
    }
}
