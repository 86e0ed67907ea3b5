use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::solver::SearchNode;

/// Order in which discovered nodes are expanded.
///
/// Nodes live in the solver's arena, frontiers only hold indices into it.
pub(crate) trait Frontier {
    fn push(&mut self, index: usize, node: &SearchNode);

    /// A node which is already queued got a cheaper path.
    fn update(&mut self, index: usize, node: &SearchNode);

    fn pop(&mut self, nodes: &[SearchNode]) -> Option<usize>;
}

/// First in, first out - breadth-first search.
#[derive(Debug, Default)]
pub(crate) struct FifoFrontier(VecDeque<usize>);

impl Frontier for FifoFrontier {
    fn push(&mut self, index: usize, _node: &SearchNode) {
        self.0.push_back(index);
    }

    fn update(&mut self, _index: usize, _node: &SearchNode) {
        // position in the queue depends only on when the node was discovered
    }

    fn pop(&mut self, _nodes: &[SearchNode]) -> Option<usize> {
        self.0.pop_front()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    priority: u32,
    dist: u32,
    seq: u64,
    index: usize,
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap so "greater" means "expanded sooner":
        // lower priority first, then deeper nodes, then older entries
        other
            .priority
            .cmp(&self.priority)
            .then(self.dist.cmp(&other.dist))
            .then(other.seq.cmp(&self.seq))
    }
}

/// Lowest priority (f-value) first - A*.
///
/// Cheaper paths to queued nodes push a new entry, the old one is skipped when it comes up.
#[derive(Debug, Default)]
pub(crate) struct PriorityFrontier {
    heap: BinaryHeap<QueueEntry>,
    seq: u64,
}

impl PriorityFrontier {
    fn entry(&mut self, index: usize, node: &SearchNode) -> QueueEntry {
        let priority = node
            .priority
            .expect("nodes in a priority frontier must have a priority");
        self.seq += 1;
        QueueEntry {
            priority,
            dist: node.dist,
            seq: self.seq,
            index,
        }
    }
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, index: usize, node: &SearchNode) {
        let entry = self.entry(index, node);
        self.heap.push(entry);
    }

    fn update(&mut self, index: usize, node: &SearchNode) {
        self.push(index, node);
    }

    fn pop(&mut self, nodes: &[SearchNode]) -> Option<usize> {
        while let Some(entry) = self.heap.pop() {
            let node = &nodes[entry.index];
            if node.in_frontier && node.dist == entry.dist && node.priority == Some(entry.priority) {
                return Some(entry.index);
            }
        }
        None
    }
}
