//! Search trace: an append-only replay log of frontier snapshots
//!
//! Planners push one snapshot per iteration. The trace is consumed by
//! replay and visualization layers only; no planner reads it back.

use crate::common::types::GridCoord;

/// State of the search at one iteration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceSnapshot {
    /// Discovered but not yet expanded cells (RRT: the tree, ACO: cells on successful ant paths)
    pub frontier: Vec<GridCoord>,
    /// Cell expanded / added during this iteration, if any
    pub expanded: Option<GridCoord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchTrace {
    snapshots: Vec<TraceSnapshot>,
}

impl SearchTrace {
    pub fn new() -> Self {
        Self { snapshots: Vec::new() }
    }

    pub(crate) fn record(&mut self, frontier: Vec<GridCoord>) {
        self.snapshots.push(TraceSnapshot { frontier, expanded: None });
    }

    /// Attach the expanded cell to the most recent snapshot
    pub(crate) fn mark_expanded(&mut self, coord: GridCoord) {
        if let Some(last) = self.snapshots.last_mut() {
            last.expanded = Some(coord);
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TraceSnapshot> {
        self.snapshots.get(index)
    }

    pub fn last(&self) -> Option<&TraceSnapshot> {
        self.snapshots.last()
    }

    /// Iterate snapshots in recording order. Each call starts from the beginning.
    pub fn iter(&self) -> std::slice::Iter<'_, TraceSnapshot> {
        self.snapshots.iter()
    }

    /// Expanded cells in the order they were expanded
    pub fn expansion_order(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.snapshots.iter().filter_map(|s| s.expanded)
    }

    pub fn max_frontier_len(&self) -> usize {
        self.snapshots.iter().map(|s| s.frontier.len()).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a SearchTrace {
    type Item = &'a TraceSnapshot;
    type IntoIter = std::slice::Iter<'a, TraceSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
