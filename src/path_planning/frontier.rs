//! Frontier containers for graph search
//!
//! A*, BFS and DFS share all bookkeeping and differ only in the order in
//! which discovered cells are handed back for expansion.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::common::GridCoord;

/// Open-set container
pub trait Frontier: Default {
    /// Best-first frontiers re-key a cell whenever its cost improves.
    /// Uninformed frontiers keep the first discovery of a cell forever.
    const RELAXES: bool;

    /// Insert a cell, or re-key it if already present (best-first only)
    fn push(&mut self, coord: GridCoord, priority: f64);

    fn pop(&mut self) -> Option<GridCoord>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cells currently in the frontier, in the order they would be popped
    fn snapshot(&self) -> Vec<GridCoord>;
}

/// Node with priority for the best-first open set (min-heap)
#[derive(Debug)]
struct PriorityNode {
    coord: GridCoord,
    priority: OrderedFloat<f64>,
    /// Insertion counter, breaks priority ties first-in first-out
    seq: u64,
}

impl PriorityNode {
    fn key(&self) -> (OrderedFloat<f64>, u64) {
        (self.priority, self.seq)
    }
}

impl Eq for PriorityNode {}

impl PartialEq for PriorityNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Ord for PriorityNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for PriorityNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority frontier keyed by `(priority, insertion order)`
///
/// Re-keying pushes a fresh entry; superseded entries stay in the heap and
/// are skipped on pop.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<PriorityNode>,
    live: HashMap<GridCoord, u64>,
    next_seq: u64,
}

impl PriorityFrontier {
    fn is_live(&self, node: &PriorityNode) -> bool {
        self.live.get(&node.coord) == Some(&node.seq)
    }
}

impl Frontier for PriorityFrontier {
    const RELAXES: bool = true;

    fn push(&mut self, coord: GridCoord, priority: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.live.insert(coord, seq);
        self.heap.push(PriorityNode {
            coord,
            priority: OrderedFloat(priority),
            seq,
        });
    }

    fn pop(&mut self) -> Option<GridCoord> {
        while let Some(node) = self.heap.pop() {
            if self.is_live(&node) {
                self.live.remove(&node.coord);
                return Some(node.coord);
            }
        }
        None
    }

    fn len(&self) -> usize {
        self.live.len()
    }

    fn snapshot(&self) -> Vec<GridCoord> {
        self.heap
            .iter()
            .filter(|node| self.is_live(node))
            .sorted_by_key(|node| node.key())
            .map(|node| node.coord)
            .collect()
    }
}

/// First-in first-out frontier (breadth-first search)
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<GridCoord>,
}

impl Frontier for FifoFrontier {
    const RELAXES: bool = false;

    fn push(&mut self, coord: GridCoord, _priority: f64) {
        self.queue.push_back(coord);
    }

    fn pop(&mut self) -> Option<GridCoord> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn snapshot(&self) -> Vec<GridCoord> {
        self.queue.iter().copied().collect()
    }
}

/// Last-in first-out frontier (depth-first search)
#[derive(Debug, Default)]
pub struct LifoFrontier {
    stack: Vec<GridCoord>,
}

impl Frontier for LifoFrontier {
    const RELAXES: bool = false;

    fn push(&mut self, coord: GridCoord, _priority: f64) {
        self.stack.push(coord);
    }

    fn pop(&mut self) -> Option<GridCoord> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn snapshot(&self) -> Vec<GridCoord> {
        self.stack.iter().rev().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> GridCoord {
        GridCoord::new(x, y)
    }

    #[test]
    fn test_priority_ties_pop_in_insertion_order() {
        let mut frontier = PriorityFrontier::default();
        frontier.push(c(0, 0), 2.0);
        frontier.push(c(1, 0), 1.0);
        frontier.push(c(2, 0), 1.0);
        frontier.push(c(3, 0), 1.0);

        assert_eq!(frontier.snapshot(), vec![c(1, 0), c(2, 0), c(3, 0), c(0, 0)]);
        assert_eq!(frontier.pop(), Some(c(1, 0)));
        assert_eq!(frontier.pop(), Some(c(2, 0)));
        assert_eq!(frontier.pop(), Some(c(3, 0)));
        assert_eq!(frontier.pop(), Some(c(0, 0)));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_priority_rekey_supersedes_old_entry() {
        let mut frontier = PriorityFrontier::default();
        frontier.push(c(0, 0), 5.0);
        frontier.push(c(1, 1), 3.0);
        frontier.push(c(0, 0), 1.0);

        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.snapshot(), vec![c(0, 0), c(1, 1)]);
        assert_eq!(frontier.pop(), Some(c(0, 0)));
        assert_eq!(frontier.pop(), Some(c(1, 1)));
        // stale (0, 0) @ 5.0 is skipped
        assert_eq!(frontier.pop(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_fifo_and_lifo_order() {
        let mut fifo = FifoFrontier::default();
        let mut lifo = LifoFrontier::default();
        for i in 0..3 {
            fifo.push(c(i, 0), 0.0);
            lifo.push(c(i, 0), 0.0);
        }
        assert_eq!(fifo.snapshot(), vec![c(0, 0), c(1, 0), c(2, 0)]);
        assert_eq!(lifo.snapshot(), vec![c(2, 0), c(1, 0), c(0, 0)]);
        assert_eq!(fifo.pop(), Some(c(0, 0)));
        assert_eq!(lifo.pop(), Some(c(2, 0)));
    }
}
