//! Common types used throughout grid_planning

use std::f64::consts::SQRT_2;
use std::fmt;

use crate::common::trace::SearchTrace;

/// Integer grid coordinate, the identity of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Manhattan (L1) distance
    pub fn manhattan(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Chebyshev (L-inf) distance, the number of 8-connected moves on an open grid
    pub fn chebyshev(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    pub fn distance(&self, other: &GridCoord) -> f64 {
        self.to_point().distance(&other.to_point())
    }

    /// Geometric cost of a move to an adjacent cell: 1 orthogonal, √2 diagonal
    pub fn step_cost(&self, other: &GridCoord) -> f64 {
        if self.x != other.x && self.y != other.y {
            SQRT_2
        } else {
            1.0
        }
    }

    pub fn to_point(&self) -> Point2D {
        Point2D::new(self.x as f64, self.y as f64)
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from(tuple: (i32, i32)) -> Self {
        Self { x: tuple.0, y: tuple.1 }
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single grid cell
///
/// `cost` is positive and finite for traversable cells and `f64::INFINITY`
/// for obstacles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub coord: GridCoord,
    pub cost: f64,
}

impl Cell {
    pub fn traversable(&self) -> bool {
        self.cost.is_finite()
    }

    pub fn is_obstacle(&self) -> bool {
        !self.traversable()
    }
}

/// 2D point representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Heading of the segment from `self` to `other`, in radians
    pub fn heading_to(&self, other: &Point2D) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

/// Lifecycle of a search session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// More iterations can be requested
    Running,
    /// Goal reached, path available
    Found,
    /// Nothing left to expand: no path exists
    FrontierExhausted,
    /// Iteration budget spent without reaching the goal
    BudgetExhausted,
}

impl SearchStatus {
    pub fn is_finished(&self) -> bool {
        *self != SearchStatus::Running
    }
}

/// Outcome of one planner invocation
///
/// `path` is either empty (goal not reached) or a contiguous chain of
/// grid-adjacent cells from start to goal.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub path: Vec<GridCoord>,
    pub trace: SearchTrace,
    pub explored_count: usize,
    /// Sum of move costs along `path`; `f64::INFINITY` when no path was found
    pub cost: f64,
    pub iterations: usize,
    pub status: SearchStatus,
}

impl SearchResult {
    pub(crate) fn found(
        path: Vec<GridCoord>,
        cost: f64,
        trace: SearchTrace,
        explored_count: usize,
        iterations: usize,
    ) -> Self {
        Self { path, trace, explored_count, cost, iterations, status: SearchStatus::Found }
    }

    pub(crate) fn failed(
        status: SearchStatus,
        trace: SearchTrace,
        explored_count: usize,
        iterations: usize,
    ) -> Self {
        Self {
            path: Vec::new(),
            trace,
            explored_count,
            cost: f64::INFINITY,
            iterations,
            status,
        }
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}
