//! grid_planning - path search on 8-connected obstacle grids
//!
//! This crate provides grid worlds with a corner-cutting motion model and
//! four interchangeable planners over them: A*, BFS/DFS, a grid RRT and
//! ant colony optimization. Every planner can be driven one iteration at a
//! time and records a replayable trace of its frontier.

// Core modules
pub mod common;

// Algorithm modules
pub mod mapping;
pub mod path_planning;
pub mod evaluation;

// Re-export common types for convenience
pub use common::{GridCoord, Cell, Point2D, SearchResult, SearchStatus};
pub use common::{SearchTrace, TraceSnapshot};
pub use common::{GridPlanner, IncrementalSearch};
pub use common::{PlanningError, PlanningResult};
pub use mapping::GridWorld;
pub use path_planning::PlannerConfig;
