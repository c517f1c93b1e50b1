//! Error types for grid_planning

use thiserror::Error;

/// Main error type for grid path search
///
/// Only structural problems are errors. A search that finishes without
/// reaching the goal is a normal [`SearchResult`](crate::common::SearchResult)
/// with an empty path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanningError {
    /// Obstacle matrix is malformed or does not match the declared size
    #[error("Map format error: {0}")]
    MapFormat(String),
    /// Start or goal is an obstacle, out of bounds, or start equals goal
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Non-positive counts, zero grid size, out-of-range rates
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PlanningError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        PlanningError::Configuration(msg.into())
    }

    pub(crate) fn map_format(msg: impl Into<String>) -> Self {
        PlanningError::MapFormat(msg.into())
    }

    pub(crate) fn endpoint(msg: impl Into<String>) -> Self {
        PlanningError::InvalidEndpoint(msg.into())
    }
}

/// Result type alias for planning operations
pub type PlanningResult<T> = Result<T, PlanningError>;
