//! Common traits defining interfaces for grid planners

use crate::common::error::PlanningResult;
use crate::common::trace::SearchTrace;
use crate::common::types::{GridCoord, SearchResult, SearchStatus};
use crate::mapping::GridWorld;

/// A search in progress that can be advanced one iteration at a time
///
/// Animation and replay layers drive `step` at their own pace; callers that
/// only want the answer use `run_to_completion`.
pub trait IncrementalSearch {
    /// Run one iteration. Returns the status after the iteration; once the
    /// status is finished further calls are no-ops.
    fn step(&mut self) -> SearchStatus;

    fn status(&self) -> SearchStatus;

    fn is_finished(&self) -> bool {
        self.status().is_finished()
    }

    /// Iterations performed so far
    fn iterations(&self) -> usize;

    fn trace(&self) -> &SearchTrace;

    /// Consume the session. An unfinished session yields an empty result.
    fn into_result(self) -> SearchResult;

    fn run_to_completion(mut self) -> SearchResult
    where
        Self: Sized,
    {
        while !self.step().is_finished() {}
        self.into_result()
    }
}

/// Trait for grid path planning strategies
///
/// Implementors are lightweight configuration values; all per-search state
/// lives in the session returned by `begin`, so one planner and one world can
/// serve any number of searches.
pub trait GridPlanner {
    type Search<'w>: IncrementalSearch
    where
        Self: 'w;

    /// Short name used in logs and benchmark tables
    fn name(&self) -> &'static str;

    /// Validate configuration and endpoints and start a new search session
    fn begin<'w>(
        &'w self,
        world: &'w GridWorld,
        start: GridCoord,
        goal: GridCoord,
    ) -> PlanningResult<Self::Search<'w>>;

    /// Plan a path from start to goal
    fn plan(&self, world: &GridWorld, start: GridCoord, goal: GridCoord) -> PlanningResult<SearchResult> {
        Ok(self.begin(world, start, goal)?.run_to_completion())
    }
}
