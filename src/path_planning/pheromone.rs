//! Pheromone levels on the edges of a grid world

use std::collections::HashMap;

use itertools::{Itertools, MinMaxResult};

use crate::common::GridCoord;
use crate::mapping::GridWorld;

/// Undirected edge between two adjacent cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(GridCoord, GridCoord);

impl EdgeKey {
    /// Edge key; `(a, b)` and `(b, a)` produce the same key
    pub fn new(a: GridCoord, b: GridCoord) -> Self {
        if a <= b {
            EdgeKey(a, b)
        } else {
            EdgeKey(b, a)
        }
    }

    pub fn endpoints(&self) -> (GridCoord, GridCoord) {
        (self.0, self.1)
    }
}

/// Pheromone level of every allowed move in a world
#[derive(Debug, Clone)]
pub struct PheromoneField {
    levels: HashMap<EdgeKey, f64>,
    initial: f64,
    floor: f64,
}

impl PheromoneField {
    /// Field with `initial` on every allowed edge. Levels never drop below `floor`.
    pub fn new(world: &GridWorld, initial: f64, floor: f64) -> Self {
        let levels = world
            .traversable_cells()
            .flat_map(|cell| world.neighbors(cell).into_iter().map(move |next| EdgeKey::new(cell, next)))
            .map(|edge| (edge, initial))
            .collect();
        PheromoneField { levels, initial, floor }
    }

    /// Restore every edge to the initial level
    pub fn reset(&mut self) {
        let initial = self.initial;
        self.levels.values_mut().for_each(|level| *level = initial);
    }

    /// Level on the edge between `a` and `b`, `None` if the move is not allowed
    pub fn level(&self, a: GridCoord, b: GridCoord) -> Option<f64> {
        self.levels.get(&EdgeKey::new(a, b)).copied()
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Scale every edge by `1 - rate`, clamped at the floor
    pub fn evaporate(&mut self, rate: f64) {
        let floor = self.floor;
        for level in self.levels.values_mut() {
            *level = (*level * (1.0 - rate)).max(floor);
        }
    }

    /// Add `amount` to every edge along `path`
    pub fn deposit(&mut self, path: &[GridCoord], amount: f64) {
        for (&a, &b) in path.iter().tuple_windows() {
            if let Some(level) = self.levels.get_mut(&EdgeKey::new(a, b)) {
                *level += amount;
            }
        }
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EdgeKey, f64)> + '_ {
        self.levels.iter().map(|(&edge, &level)| (edge, level))
    }

    /// Lowest and highest level on the field
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self.levels.values().copied().minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(level) => Some((level, level)),
            MinMaxResult::MinMax(min, max) => Some((min, max)),
        }
    }

    /// All edges carry the same level, within `tolerance`
    pub fn is_uniform(&self, tolerance: f64) -> bool {
        self.bounds().map_or(true, |(min, max)| max - min <= tolerance)
    }
}
