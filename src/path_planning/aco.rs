//! Ant Colony Optimization path planning on a grid
//!
//! Each colony iteration releases a batch of ants from the start. An ant
//! walks to unvisited neighbors chosen by roulette wheel, weighted by the
//! pheromone on the edge and the inverse move cost. Ants that reach the goal
//! reinforce their edges in proportion to `1 / path_cost` after the whole
//! field evaporates. The best path seen so far is kept; there is no
//! optimality guarantee.

use std::collections::HashSet;

use itertools::Itertools;
use log::{debug, trace};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{
    GridCoord, GridPlanner, IncrementalSearch, PlanningError, PlanningResult, SearchResult, SearchStatus,
    SearchTrace,
};
use crate::mapping::GridWorld;
use crate::path_planning::pheromone::PheromoneField;

/// Configuration for ACO planner
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Ants released per iteration
    pub num_ants: usize,
    pub num_iterations: usize,
    /// Fraction of pheromone lost per iteration (0.0 - 1.0)
    pub evaporation_rate: f64,
    /// Pheromone exponent
    pub alpha: f64,
    /// Inverse move cost exponent
    pub beta: f64,
    pub initial_pheromone: f64,
    /// Lower bound on any edge level
    pub min_pheromone: f64,
    pub seed: u64,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_ants: 50,
            num_iterations: 100,
            evaporation_rate: 0.1,
            alpha: 1.0,
            beta: 2.0,
            initial_pheromone: 0.1,
            min_pheromone: 1e-6,
            seed: 0,
        }
    }
}

impl AcoConfig {
    pub fn validate(&self) -> PlanningResult<()> {
        if self.num_ants == 0 || self.num_iterations == 0 {
            return Err(PlanningError::config("num_ants and num_iterations must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.evaporation_rate) {
            return Err(PlanningError::config(format!(
                "evaporation_rate must be in [0, 1], got {}",
                self.evaporation_rate
            )));
        }
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlanningError::config(format!("{} must be finite and >= 0, got {}", name, value)));
            }
        }
        if !(self.min_pheromone > 0.0 && self.min_pheromone <= self.initial_pheromone)
            || !self.initial_pheromone.is_finite()
        {
            return Err(PlanningError::config(format!(
                "need 0 < min_pheromone <= initial_pheromone, got {} and {}",
                self.min_pheromone, self.initial_pheromone
            )));
        }
        Ok(())
    }
}

/// Walk of a single ant that reached the goal
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AntPath {
    pub cells: Vec<GridCoord>,
    pub cost: f64,
}

/// Outcome of one colony iteration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationReport {
    /// Ants that reached the goal, in release order
    pub successful: Vec<AntPath>,
    /// Cheapest successful ant of this iteration
    pub best: Option<AntPath>,
}

/// ACO search session; one step is one colony iteration
pub struct AcoSearch<'w> {
    world: &'w GridWorld,
    config: &'w AcoConfig,
    start: GridCoord,
    goal: GridCoord,
    rng: StdRng,
    field: PheromoneField,
    best: Option<AntPath>,
    reports: Vec<IterationReport>,
    visited: HashSet<GridCoord>,
    trace: SearchTrace,
    iterations: usize,
    status: SearchStatus,
}

impl<'w> AcoSearch<'w> {
    fn new(world: &'w GridWorld, config: &'w AcoConfig, start: GridCoord, goal: GridCoord) -> Self {
        let field = PheromoneField::new(world, config.initial_pheromone, config.min_pheromone);
        debug!(
            "[ACO] search start={} goal={} grid={} ants={} iterations={} edges={}",
            start,
            goal,
            world.size(),
            config.num_ants,
            config.num_iterations,
            field.len()
        );
        AcoSearch {
            world,
            config,
            start,
            goal,
            rng: StdRng::seed_from_u64(config.seed),
            field,
            best: None,
            reports: Vec::new(),
            visited: HashSet::new(),
            trace: SearchTrace::new(),
            iterations: 0,
            status: SearchStatus::Running,
        }
    }

    pub fn pheromones(&self) -> &PheromoneField {
        &self.field
    }

    /// Best path found so far
    pub fn best(&self) -> Option<&AntPath> {
        self.best.as_ref()
    }

    /// One report per completed iteration
    pub fn reports(&self) -> &[IterationReport] {
        &self.reports
    }

    /// Consume the session, keeping the colony history alongside the result
    pub fn into_parts(mut self) -> (SearchResult, Vec<IterationReport>, PheromoneField) {
        let result = self.take_result();
        (result, self.reports, self.field)
    }

    fn take_result(&mut self) -> SearchResult {
        let explored = self.visited.len();
        let trace = std::mem::take(&mut self.trace);
        match (self.status, self.best.take()) {
            (SearchStatus::Found, Some(best)) => {
                SearchResult::found(best.cells, best.cost, trace, explored, self.iterations)
            }
            (status, _) => SearchResult::failed(status, trace, explored, self.iterations),
        }
    }

    /// `ln(tau^alpha * eta^beta)` for the edge `from -> to`
    fn log_transition_weight(&self, from: GridCoord, to: GridCoord) -> f64 {
        let tau = self.field.level(from, to).unwrap_or(self.field.floor());
        let eta = 1.0 / self.world.move_cost(from, to);
        self.config.alpha * tau.ln() + self.config.beta * eta.ln()
    }

    /// Roulette-wheel pick over `weights`; uniform if no weight is usable
    fn choose(&mut self, weights: &[f64]) -> usize {
        match WeightedIndex::new(weights) {
            Ok(roulette) => roulette.sample(&mut self.rng),
            Err(_) => self.rng.gen_range(0..weights.len()),
        }
    }

    /// Release one ant. `None` if it gets stuck or runs out of steps.
    fn walk_ant(&mut self) -> Option<AntPath> {
        let max_steps = self.world.cell_count();
        let mut cells = vec![self.start];
        let mut on_path = HashSet::from([self.start]);
        let mut cost = 0.0;
        let mut current = self.start;
        let mut steps = 0;

        while current != self.goal && steps < max_steps {
            steps += 1;
            let candidates: Vec<GridCoord> = self
                .world
                .neighbors(current)
                .into_iter()
                .filter(|next| !on_path.contains(next))
                .collect();
            if candidates.is_empty() {
                break;
            }

            let log_weights: Vec<f64> =
                candidates.iter().map(|&next| self.log_transition_weight(current, next)).collect();
            let next = candidates[self.choose(&relative_weights(&log_weights))];

            self.visited.insert(next);
            on_path.insert(next);
            cost += self.world.move_cost(current, next);
            cells.push(next);
            current = next;
        }

        (current == self.goal).then_some(AntPath { cells, cost })
    }

    fn finish(&mut self, status: SearchStatus) -> SearchStatus {
        self.status = status;
        debug!(
            "[ACO] finished {:?} after {} iterations, best cost {}",
            status,
            self.iterations,
            self.best.as_ref().map_or(f64::INFINITY, |b| b.cost)
        );
        status
    }
}

impl<'w> IncrementalSearch for AcoSearch<'w> {
    fn step(&mut self) -> SearchStatus {
        if self.status.is_finished() {
            return self.status;
        }

        self.iterations += 1;
        self.visited.insert(self.start);
        let successful: Vec<AntPath> = (0..self.config.num_ants).filter_map(|_| self.walk_ant()).collect();

        self.field.evaporate(self.config.evaporation_rate);
        for ant in &successful {
            self.field.deposit(&ant.cells, 1.0 / ant.cost);
        }

        let iteration_best = successful.iter().min_by(|a, b| a.cost.total_cmp(&b.cost)).cloned();
        if let Some(candidate) = &iteration_best {
            if self.best.as_ref().map_or(true, |best| candidate.cost < best.cost) {
                self.best = Some(candidate.clone());
            }
        }
        trace!(
            "[ACO] iteration {}: {}/{} ants reached the goal, iteration best {:?}",
            self.iterations,
            successful.len(),
            self.config.num_ants,
            iteration_best.as_ref().map(|b| b.cost)
        );

        let touched = successful.iter().flat_map(|ant| ant.cells.iter().copied()).unique().collect();
        self.trace.record(touched);
        self.reports.push(IterationReport { successful, best: iteration_best });

        if self.iterations >= self.config.num_iterations {
            let status = if self.best.is_some() {
                SearchStatus::Found
            } else {
                SearchStatus::BudgetExhausted
            };
            return self.finish(status);
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

    fn into_result(mut self) -> SearchResult {
        self.take_result()
    }
}

/// Scale log-space weights so the largest becomes 1.0
///
/// Large exponents push `tau^alpha` past the range of `f64`; working in log
/// space keeps every weight finite with at least one equal to 1.0.
fn relative_weights(log_weights: &[f64]) -> Vec<f64> {
    let max = log_weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    log_weights.iter().map(|w| (w - max).exp()).collect()
}

/// Ant colony path planner
#[derive(Debug, Clone, Default)]
pub struct AcoPlanner {
    config: AcoConfig,
}

impl AcoPlanner {
    pub fn new(config: AcoConfig) -> Self {
        AcoPlanner { config }
    }

    pub fn config(&self) -> &AcoConfig {
        &self.config
    }
}

impl GridPlanner for AcoPlanner {
    type Search<'w> = AcoSearch<'w>;

    fn name(&self) -> &'static str {
        "ACO"
    }

    fn begin<'w>(
        &'w self,
        world: &'w GridWorld,
        start: GridCoord,
        goal: GridCoord,
    ) -> PlanningResult<Self::Search<'w>> {
        self.config.validate()?;
        world.validate_endpoints(start, goal)?;
        Ok(AcoSearch::new(world, &self.config, start, goal))
    }
}
