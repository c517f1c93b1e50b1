//! Grid world definition
//!
//! An N×N grid of cells with per-cell traversal cost, 8-connected adjacency
//! and a corner-cutting rule for diagonal moves. The world is immutable
//! once built and can be shared read-only between any number of searches.

use itertools::iproduct;
use nalgebra::DMatrix;

use crate::common::{Cell, GridCoord, PlanningError, PlanningResult};

/// Motion model: dx, dy. Orthogonal moves first, then diagonals.
pub const MOTIONS: [(i32, i32); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Cost of a traversable cell loaded from a 0/1 map
pub const FREE_CELL_COST: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GridWorld {
    size: usize,
    /// Indexed `(x, y)`; `f64::INFINITY` marks an obstacle
    costs: DMatrix<f64>,
}

impl GridWorld {
    /// Create an obstacle-free world of unit-cost cells
    pub fn new(size: usize) -> PlanningResult<Self> {
        if size == 0 {
            return Err(PlanningError::config("grid size must be > 0"));
        }
        if size > i32::MAX as usize {
            return Err(PlanningError::config(format!("grid size {} is too large", size)));
        }
        Ok(Self {
            size,
            costs: DMatrix::from_element(size, size, FREE_CELL_COST),
        })
    }

    /// Build a world from a 0/1 obstacle matrix where `rows[x][y] == 1` marks an obstacle
    pub fn from_obstacle_rows<R: AsRef<[u8]>>(size: usize, rows: &[R]) -> PlanningResult<Self> {
        let mut world = Self::new(size)?;

        if rows.len() != size {
            return Err(PlanningError::map_format(format!(
                "expected {} rows, got {}",
                size,
                rows.len()
            )));
        }

        for (x, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(PlanningError::map_format(format!(
                    "row {} has {} columns, expected {}",
                    x,
                    row.len(),
                    size
                )));
            }
            for (y, &value) in row.iter().enumerate() {
                world.costs[(x, y)] = Self::cost_from_flag(value, x, y)?;
            }
        }

        Ok(world)
    }

    /// Build a world from a square 0/1 matrix, upscaling every entry to a
    /// `scale`×`scale` block
    pub fn from_matrix(matrix: &DMatrix<u8>, scale: usize) -> PlanningResult<Self> {
        if scale < 1 {
            return Err(PlanningError::config("scale must be >= 1"));
        }
        if matrix.nrows() != matrix.ncols() {
            return Err(PlanningError::map_format(format!(
                "map must be square, got {}x{}",
                matrix.nrows(),
                matrix.ncols()
            )));
        }

        let grid = matrix.kronecker(&DMatrix::<u8>::repeat(scale, scale, 1));
        let mut world = Self::new(grid.nrows())?;
        for (x, y) in iproduct!(0..grid.nrows(), 0..grid.ncols()) {
            world.costs[(x, y)] = Self::cost_from_flag(grid[(x, y)], x, y)?;
        }
        Ok(world)
    }

    fn cost_from_flag(value: u8, x: usize, y: usize) -> PlanningResult<f64> {
        match value {
            0 => Ok(FREE_CELL_COST),
            1 => Ok(f64::INFINITY),
            other => Err(PlanningError::map_format(format!(
                "cell ({}, {}) has value {}, expected 0 or 1",
                x, y, other
            ))),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    pub fn in_bounds(&self, coord: GridCoord) -> bool {
        let n = self.size as i32;
        coord.x >= 0 && coord.y >= 0 && coord.x < n && coord.y < n
    }

    pub fn cell(&self, coord: GridCoord) -> Option<Cell> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some(Cell { coord, cost: self.costs[(coord.x as usize, coord.y as usize)] })
    }

    /// Traversal cost of a cell; out-of-bounds cells are reported as obstacles
    pub fn cost(&self, coord: GridCoord) -> f64 {
        self.cell(coord).map_or(f64::INFINITY, |c| c.cost)
    }

    /// In bounds and not an obstacle
    pub fn is_traversable(&self, coord: GridCoord) -> bool {
        self.cost(coord).is_finite()
    }

    /// In bounds and an obstacle
    pub fn is_obstacle(&self, coord: GridCoord) -> bool {
        self.in_bounds(coord) && !self.is_traversable(coord)
    }

    /// Set the traversal cost of one cell. `f64::INFINITY` turns it into an obstacle.
    pub fn set_cost(&mut self, coord: GridCoord, cost: f64) -> PlanningResult<()> {
        if !self.in_bounds(coord) {
            return Err(PlanningError::map_format(format!(
                "cell {} is outside a {}x{} grid",
                coord, self.size, self.size
            )));
        }
        if cost.is_nan() || cost <= 0.0 {
            return Err(PlanningError::map_format(format!(
                "cell {} cost must be positive, got {}",
                coord, cost
            )));
        }
        self.costs[(coord.x as usize, coord.y as usize)] = cost;
        Ok(())
    }

    pub fn set_obstacle(&mut self, coord: GridCoord) -> PlanningResult<()> {
        self.set_cost(coord, f64::INFINITY)
    }

    pub fn clear_obstacle(&mut self, coord: GridCoord) -> PlanningResult<()> {
        self.set_cost(coord, FREE_CELL_COST)
    }

    /// Every coordinate of the grid, x-major
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> {
        let n = self.size as i32;
        iproduct!(0..n, 0..n).map(|(x, y)| GridCoord::new(x, y))
    }

    pub fn traversable_cells(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.coords().filter(move |&c| self.is_traversable(c))
    }

    pub fn obstacle_count(&self) -> usize {
        self.costs.iter().filter(|c| c.is_infinite()).count()
    }

    /// Diagonal move from `from` to `to` squeezes between obstacles
    ///
    /// True when either orthogonal cell shared by both endpoints is an
    /// obstacle. Always false for orthogonal moves.
    pub fn cuts_corner(&self, from: GridCoord, to: GridCoord) -> bool {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx == 0 || dy == 0 {
            return false;
        }
        !self.is_traversable(from.offset(dx, 0)) || !self.is_traversable(from.offset(0, dy))
    }

    /// One king move apart, regardless of obstacles
    pub fn is_adjacent(&self, a: GridCoord, b: GridCoord) -> bool {
        a.chebyshev(&b) == 1 && self.in_bounds(a) && self.in_bounds(b)
    }

    /// Single-step move between two traversable, adjacent cells that does not cut a corner
    pub fn allows_move(&self, from: GridCoord, to: GridCoord) -> bool {
        self.is_adjacent(from, to)
            && self.is_traversable(from)
            && self.is_traversable(to)
            && !self.cuts_corner(from, to)
    }

    /// Traversable neighbors reachable in one move, in motion-model order
    pub fn neighbors(&self, coord: GridCoord) -> Vec<GridCoord> {
        if !self.is_traversable(coord) {
            return Vec::new();
        }
        MOTIONS
            .iter()
            .map(|&(dx, dy)| coord.offset(dx, dy))
            .filter(|&next| self.allows_move(coord, next))
            .collect()
    }

    /// 1.0 for an orthogonal step, √2 for a diagonal step
    pub fn move_cost(&self, from: GridCoord, to: GridCoord) -> f64 {
        from.step_cost(&to)
    }

    /// Check that start and goal are usable endpoints for a search
    pub fn validate_endpoints(&self, start: GridCoord, goal: GridCoord) -> PlanningResult<()> {
        for (name, coord) in [("start", start), ("goal", goal)] {
            if !self.in_bounds(coord) {
                return Err(PlanningError::endpoint(format!(
                    "{} {} is outside a {}x{} grid",
                    name, coord, self.size, self.size
                )));
            }
            if !self.is_traversable(coord) {
                return Err(PlanningError::endpoint(format!("{} {} is an obstacle", name, coord)));
            }
        }
        if start == goal {
            return Err(PlanningError::endpoint(format!("start and goal are both {}", start)));
        }
        Ok(())
    }

    /// Path made only of traversable cells joined by allowed single moves
    pub fn is_valid_path(&self, path: &[GridCoord]) -> bool {
        path.iter().all(|&c| self.is_traversable(c))
            && path.windows(2).all(|w| self.allows_move(w[0], w[1]))
    }
}
