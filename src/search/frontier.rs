use super::SearchNode;
use crate::error::SearchError;
use crate::problem::Problem;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

// Heap entry; `sequence` breaks ties between equal `f` first-in first-out.
struct FrontierEntry<P: Problem> {
    node: Rc<SearchNode<P>>,
    sequence: u64,
}

impl<P: Problem> PartialEq for FrontierEntry<P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<P: Problem> Eq for FrontierEntry<P> {}

impl<P: Problem> PartialOrd for FrontierEntry<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// `BinaryHeap` is a max-heap: lower f and older entries compare greater.
impl<P: Problem> Ord for FrontierEntry<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .cmp_f(&self.node)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Pending nodes, always yielding the one with minimal `f`.
pub struct PriorityFrontier<P: Problem> {
    heap: BinaryHeap<FrontierEntry<P>>,
    next_sequence: u64,
    high_water: usize,
}

impl<P: Problem> Default for PriorityFrontier<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Problem> PriorityFrontier<P> {
    pub fn new() -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            next_sequence: 0,
            high_water: 0,
        }
    }

    pub fn push(&mut self, node: Rc<SearchNode<P>>) {
        self.heap.push(FrontierEntry {
            node,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
        self.high_water = self.high_water.max(self.heap.len());
    }

    pub fn pop(&mut self) -> Result<Rc<SearchNode<P>>, SearchError> {
        self.heap
            .pop()
            .map(|entry| entry.node)
            .ok_or(SearchError::EmptyFrontier)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size the frontier reached.
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}
