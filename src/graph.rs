// Copyright 2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A fixed-capacity directed graph with bucketed adjacency lists.
//!
//! The graph never grows on its own. Nodes live in an arena whose size is fixed by `init`, and
//! the outgoing edges of each node live in a chain of fixed-size buckets taken from a second,
//! bounded arena. A bucket is only ever handed out by an explicit call to `add_bucket`;
//! `add_edge` fails rather than allocating one. Everything is addressed by integer handles, so a
//! `Graph` can be cloned or moved without fixing up any pointers.

use std::fmt::{self, Debug, Formatter};
use thiserror::Error;

/// How many edge slots each bucket holds.
pub const BUCKET_SIZE: usize = 10;

pub type NodeId = usize;
pub type BucketId = usize;

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// Every node in the arena is already active.
    #[error("no free nodes")]
    OutOfNodes,
    /// The bucket arena is exhausted.
    #[error("no free buckets")]
    OutOfBuckets,
    /// The source node's bucket chain has no empty slot left.
    #[error("no empty edge slot")]
    NoEmptySlot,
}

/// An edge out of some node, as stored in one of that node's bucket slots.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Edge<L> {
    pub target: NodeId,
    pub label: L,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Node {
    pub id: NodeId,
    edges_out: Option<BucketId>,
}

#[derive(Clone, Debug, PartialEq)]
struct Bucket<L> {
    // `None` marks an empty slot.
    slots: [Option<Edge<L>>; BUCKET_SIZE],
    next: Option<BucketId>,
}

impl<L: Copy> Bucket<L> {
    fn empty() -> Bucket<L> {
        Bucket {
            slots: [None; BUCKET_SIZE],
            next: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DfsInstruction {
    Continue,
    Stop,
}

/// A directed graph whose edges carry labels of type `L`.
///
/// Node ids are dense: the active nodes are exactly `0..num_nodes()`, and `add_node` hands them
/// out in increasing order. Methods taking a node id assume that it is below `size()`; check
/// with `node_id_valid` first if in doubt.
#[derive(Clone, PartialEq)]
pub struct Graph<L> {
    nodes: Vec<Node>,
    num_nodes: usize,
    num_edges: usize,
    buckets: Vec<Bucket<L>>,
    bucket_capacity: usize,
}

impl<L: Copy> Graph<L> {
    /// Creates a graph that can hold `size` nodes and `bucket_capacity` buckets.
    pub fn new(size: usize, bucket_capacity: usize) -> Graph<L> {
        let mut ret = Graph {
            nodes: Vec::new(),
            num_nodes: 0,
            num_edges: 0,
            buckets: Vec::new(),
            bucket_capacity: 0,
        };
        ret.init(size, bucket_capacity);
        ret
    }

    /// Resets this graph to hold `size` nodes and `bucket_capacity` buckets.
    ///
    /// All nodes and edges are forgotten; node `i` gets id `i`. This can be called on a graph
    /// that is already in use in order to grow or shrink it.
    pub fn init(&mut self, size: usize, bucket_capacity: usize) {
        self.nodes.clear();
        self.nodes.extend((0..size).map(|id| Node { id: id, edges_out: None }));
        self.num_nodes = 0;
        self.num_edges = 0;
        self.buckets.clear();
        self.bucket_capacity = bucket_capacity;
    }

    /// Drops the unused part of both arenas: `bucket_capacity()` becomes `num_buckets()`, and
    /// `size()` becomes `num_nodes()` unless some edge targets a node beyond that.
    ///
    /// Existing nodes and edges are untouched, and empty slots in existing buckets can still be
    /// filled.
    pub fn shrink_to_fit(&mut self) {
        let keep = self.buckets.iter()
            .flat_map(|b| b.slots.iter().flatten())
            .map(|e| e.target + 1)
            .fold(self.num_nodes, usize::max);

        self.nodes.truncate(keep);
        self.nodes.shrink_to_fit();
        self.buckets.shrink_to_fit();
        self.bucket_capacity = self.buckets.len();
    }

    /// The maximum number of nodes.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// The number of buckets handed out so far.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket_capacity(&self) -> usize {
        self.bucket_capacity
    }

    pub fn node_id_valid(&self, id: NodeId) -> bool {
        id < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Activates the next node and returns its id.
    pub fn add_node(&mut self) -> Result<NodeId, GraphError> {
        if self.num_nodes == self.nodes.len() {
            return Err(GraphError::OutOfNodes);
        }
        self.num_nodes += 1;
        Ok(self.num_nodes - 1)
    }

    /// Takes an empty bucket from the arena and links it at the end of `node`'s chain.
    pub fn add_bucket(&mut self, node: NodeId) -> Result<BucketId, GraphError> {
        if self.buckets.len() >= self.bucket_capacity {
            return Err(GraphError::OutOfBuckets);
        }
        let bucket = self.buckets.len();
        self.buckets.push(Bucket::empty());

        match self.last_bucket(node) {
            None => self.nodes[node].edges_out = Some(bucket),
            Some(last) => self.buckets[last].next = Some(bucket),
        }
        Ok(bucket)
    }

    /// Returns true if `node` has room for another edge without a new bucket.
    pub fn has_empty_slot(&self, node: NodeId) -> bool {
        self.find_slot(node, |slot| slot.is_none()).is_some()
    }

    /// Adds a labeled edge in the first empty slot of `from`'s chain.
    ///
    /// Fails with `NoEmptySlot` if the chain is full; it is up to the caller to `add_bucket`.
    pub fn add_labeled_edge(&mut self, from: NodeId, to: NodeId, label: L)
    -> Result<(), GraphError> {
        debug_assert!(self.node_id_valid(to));

        let (bucket, idx) = self.find_slot(from, |slot| slot.is_none())
            .ok_or(GraphError::NoEmptySlot)?;
        self.buckets[bucket].slots[idx] = Some(Edge { target: to, label: label });
        self.num_edges += 1;
        Ok(())
    }

    /// Removes the first edge from `from` to `to`, if there is one.
    pub fn del_edge(&mut self, from: NodeId, to: NodeId) {
        if let Some((bucket, idx)) = self.find_target(from, to) {
            self.buckets[bucket].slots[idx] = None;
            self.num_edges -= 1;
        }
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.find_target(from, to).is_some()
    }

    /// Iterates over the edges out of `node`, in slot order.
    pub fn edges<'a>(&'a self, node: NodeId) -> Edges<'a, L> {
        Edges {
            graph: self,
            bucket: self.nodes[node].edges_out,
            idx: 0,
        }
    }

    pub fn out_degree(&self, node: NodeId) -> usize {
        self.edges(node).count()
    }

    /// Iterates over the targets of the edges out of `node`.
    pub fn neighbors<'a>(&'a self, node: NodeId) -> impl Iterator<Item=NodeId> + 'a
    where L: 'a {
        self.edges(node).map(|e| e.target)
    }

    fn last_bucket(&self, node: NodeId) -> Option<BucketId> {
        let mut cursor = self.nodes[node].edges_out?;
        while let Some(next) = self.buckets[cursor].next {
            cursor = next;
        }
        Some(cursor)
    }

    // Returns the position of the first slot in `node`'s chain satisfying `pred`.
    fn find_slot<P>(&self, node: NodeId, pred: P) -> Option<(BucketId, usize)>
    where P: Fn(&Option<Edge<L>>) -> bool {
        let mut cursor = self.nodes[node].edges_out;
        while let Some(bucket) = cursor {
            let b = &self.buckets[bucket];
            if let Some(idx) = b.slots.iter().position(&pred) {
                return Some((bucket, idx));
            }
            cursor = b.next;
        }
        None
    }

    fn find_target(&self, from: NodeId, to: NodeId) -> Option<(BucketId, usize)> {
        self.find_slot(from, |slot| slot.map_or(false, |e| e.target == to))
    }

    /// Does a depth-first search from the states in `init`.
    ///
    /// Any node below `size()` may be visited, whether or not it is active.
    ///
    /// `visit` is called with the current search path each time a new node is reached, and
    /// `cycle` is called with the looping part of the path each time a back edge is found.
    /// Returning `Stop` from either callback ends the search.
    pub fn dfs<Inits, Visit, Cycle>(&self, init: Inits, mut visit: Visit, mut cycle: Cycle)
    where
    Visit: FnMut(&[NodeId]) -> DfsInstruction,
    Cycle: FnMut(&[NodeId]) -> DfsInstruction,
    Inits: Iterator<Item=NodeId>,
    {
        let n = self.size();
        let mut stack: Vec<NodeId> = Vec::with_capacity(n);
        let mut remaining_children_stack: Vec<Edges<L>> = Vec::with_capacity(n);
        let mut visiting = vec![false; n];
        let mut done = vec![false; n];
        // For nodes that we are currently visiting, this is their position on the stack.
        let mut stack_pos = vec![0; n];

        for start in init {
            if done[start] {
                continue;
            }
            if visit(&[start]) == DfsInstruction::Stop {
                return;
            }

            visiting[start] = true;
            stack.push(start);
            remaining_children_stack.push(self.edges(start));
            stack_pos[start] = 0;

            while let Some(&cur) = stack.last() {
                // `stack` and `remaining_children_stack` always have the same length.
                let next_child = remaining_children_stack.last_mut().and_then(|it| it.next());

                if let Some(Edge { target: child, .. }) = next_child {
                    if visiting[child] {
                        if cycle(&stack[stack_pos[child]..]) == DfsInstruction::Stop {
                            return;
                        }
                    } else if !done[child] {
                        stack.push(child);
                        if visit(&stack[..]) == DfsInstruction::Stop {
                            return;
                        }
                        remaining_children_stack.push(self.edges(child));
                        visiting[child] = true;
                        stack_pos[child] = stack.len() - 1;
                    }
                    continue;
                }

                visiting[cur] = false;
                done[cur] = true;
                stack.pop();
                remaining_children_stack.pop();
            }
        }
    }

    /// Returns the nodes reachable from `init`, in depth-first order.
    pub fn dfs_order<I: Iterator<Item=NodeId>>(&self, init: I) -> Vec<NodeId> {
        let mut ret = Vec::new();
        self.dfs(init, |path| {
            ret.extend(path.last());
            DfsInstruction::Continue
        }, |_| DfsInstruction::Continue);
        ret
    }

    /// Checks whether the active part of this graph has any cycles.
    pub fn has_cycles(&self) -> bool {
        let mut found = false;
        self.dfs(0..self.num_nodes, |_| DfsInstruction::Continue, |_| {
            found = true;
            DfsInstruction::Stop
        });
        found
    }
}

impl<L: Copy + Default> Graph<L> {
    /// Adds an edge carrying the default label.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        self.add_labeled_edge(from, to, L::default())
    }
}

pub struct Edges<'a, L: 'a> {
    graph: &'a Graph<L>,
    bucket: Option<BucketId>,
    idx: usize,
}

impl<'a, L: Copy> Iterator for Edges<'a, L> {
    type Item = Edge<L>;

    fn next(&mut self) -> Option<Edge<L>> {
        while let Some(bucket) = self.bucket {
            let b = &self.graph.buckets[bucket];
            while self.idx < BUCKET_SIZE {
                let slot = b.slots[self.idx];
                self.idx += 1;
                if slot.is_some() {
                    return slot;
                }
            }
            self.bucket = b.next;
            self.idx = 0;
        }
        None
    }
}

impl<L: Copy + Debug> Debug for Graph<L> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "Graph ({} of {} nodes, {} edges, {} of {} buckets):",
                 self.num_nodes, self.size(), self.num_edges,
                 self.buckets.len(), self.bucket_capacity)?;
        for id in 0..self.num_nodes {
            writeln!(f, "\t{}:", id)?;
            for e in self.edges(id) {
                writeln!(f, "\t\t{:?} => {}", e.label, e.target)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn graph(nodes: usize, buckets: usize) -> Graph<()> {
        let mut g = Graph::new(nodes, buckets);
        for _ in 0..nodes {
            g.add_node().unwrap();
        }
        g
    }

    #[test]
    fn init_assigns_ids() {
        let g: Graph<()> = Graph::new(5, 0);
        assert_eq!(g.size(), 5);
        assert_eq!(g.num_nodes(), 0);
        assert_eq!(g.num_edges(), 0);
        for i in 0..5 {
            assert_eq!(g.node(i).id, i);
        }
    }

    #[test]
    fn reinit_resizes() {
        let mut g = graph(3, 2);
        g.add_bucket(0).unwrap();
        g.add_edge(0, 1).unwrap();
        g.init(8, 1);
        assert_eq!(g.size(), 8);
        assert_eq!(g.num_nodes(), 0);
        assert_eq!(g.num_edges(), 0);
        assert_eq!(g.num_buckets(), 0);
        assert!(!g.has_edge(0, 1));
    }

    #[test]
    fn node_capacity() {
        let mut g: Graph<()> = Graph::new(2, 0);
        assert_eq!(g.add_node(), Ok(0));
        assert_eq!(g.add_node(), Ok(1));
        assert_eq!(g.add_node(), Err(GraphError::OutOfNodes));
    }

    #[test]
    fn node_id_valid() {
        let g: Graph<()> = Graph::new(3, 0);
        assert!(g.node_id_valid(0));
        assert!(g.node_id_valid(2));
        assert!(!g.node_id_valid(3));
    }

    #[test]
    fn add_edge_needs_bucket() {
        let mut g = graph(2, 1);
        assert_eq!(g.add_edge(0, 1), Err(GraphError::NoEmptySlot));
        assert!(!g.has_empty_slot(0));
        g.add_bucket(0).unwrap();
        assert!(g.has_empty_slot(0));
        assert_eq!(g.add_edge(0, 1), Ok(()));
        assert!(g.has_edge(0, 1));
        assert!(!g.has_edge(1, 0));
        assert_eq!(g.num_edges(), 1);
    }

    #[test]
    fn bucket_overflow() {
        let mut g = graph(BUCKET_SIZE + 2, 2);
        g.add_bucket(0).unwrap();
        for i in 0..BUCKET_SIZE {
            g.add_edge(0, i + 1).unwrap();
        }
        assert_eq!(g.add_edge(0, BUCKET_SIZE + 1), Err(GraphError::NoEmptySlot));

        g.add_bucket(0).unwrap();
        g.add_edge(0, BUCKET_SIZE + 1).unwrap();
        assert_eq!(g.out_degree(0), BUCKET_SIZE + 1);
        assert_eq!(g.add_bucket(0), Err(GraphError::OutOfBuckets));
    }

    #[test]
    fn deleted_slots_are_reused() {
        let mut g = graph(BUCKET_SIZE + 2, 1);
        g.add_bucket(0).unwrap();
        for i in 0..BUCKET_SIZE {
            g.add_edge(0, i).unwrap();
        }
        g.del_edge(0, 3);
        assert!(!g.has_edge(0, 3));
        assert_eq!(g.num_edges(), BUCKET_SIZE - 1);

        g.add_edge(0, BUCKET_SIZE + 1).unwrap();
        assert_eq!(g.neighbors(0).nth(3), Some(BUCKET_SIZE + 1));
        assert_eq!(g.num_buckets(), 1);
    }

    #[test]
    fn del_missing_edge() {
        let mut g = graph(2, 1);
        g.del_edge(0, 1);
        g.add_bucket(0).unwrap();
        g.del_edge(0, 1);
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn labels() {
        let mut g: Graph<char> = Graph::new(3, 1);
        g.add_node().unwrap();
        g.add_node().unwrap();
        g.add_bucket(0).unwrap();
        g.add_labeled_edge(0, 1, 'x').unwrap();
        g.add_labeled_edge(0, 0, 'y').unwrap();
        let edges: Vec<_> = g.edges(0).map(|e| (e.target, e.label)).collect();
        assert_eq!(edges, vec![(1, 'x'), (0, 'y')]);
    }

    fn chain(edges: &[(NodeId, NodeId)], n: usize) -> Graph<()> {
        let mut g = graph(n, n);
        for i in 0..n {
            g.add_bucket(i).unwrap();
        }
        for &(a, b) in edges {
            g.add_edge(a, b).unwrap();
        }
        g
    }

    #[test]
    fn cycles() {
        assert!(!chain(&[(0, 1), (1, 2)], 3).has_cycles());
        assert!(!chain(&[(0, 1), (0, 2), (1, 2)], 3).has_cycles());
        assert!(chain(&[(0, 1), (1, 2), (2, 1)], 3).has_cycles());
        assert!(chain(&[(1, 1)], 2).has_cycles());
    }

    #[test]
    fn traversal_reaches_inactive_nodes() {
        let mut g: Graph<()> = Graph::new(5, 2);
        g.add_node().unwrap();
        g.add_bucket(0).unwrap();
        assert!(g.node_id_valid(3));
        g.add_edge(0, 3).unwrap();
        assert!(!g.has_cycles());
        assert_eq!(g.dfs_order(Some(0).into_iter()), vec![0, 3]);

        g.add_bucket(3).unwrap();
        g.add_edge(3, 0).unwrap();
        assert!(g.has_cycles());
    }

    #[test]
    fn shrink() {
        let mut g: Graph<()> = Graph::new(10, 10);
        for _ in 0..3 {
            g.add_node().unwrap();
        }
        g.add_bucket(0).unwrap();
        g.add_edge(0, 2).unwrap();
        g.shrink_to_fit();

        assert_eq!(g.size(), 3);
        assert_eq!(g.bucket_capacity(), 1);
        assert!(g.has_edge(0, 2));
        assert!(g.has_empty_slot(0));
        assert_eq!(g.add_node(), Err(GraphError::OutOfNodes));
        assert_eq!(g.add_bucket(1), Err(GraphError::OutOfBuckets));

        let mut g: Graph<()> = Graph::new(10, 10);
        g.add_node().unwrap();
        g.add_bucket(0).unwrap();
        g.add_edge(0, 6).unwrap();
        g.shrink_to_fit();
        assert_eq!(g.size(), 7);
        assert!(g.has_edge(0, 6));
        assert!(!g.has_cycles());
    }

    #[test]
    fn dfs_order() {
        let g = chain(&[(0, 2), (2, 1), (0, 3)], 5);
        assert_eq!(g.dfs_order(Some(0).into_iter()), vec![0, 2, 1, 3]);
    }

    #[quickcheck]
    fn add_then_del(pairs: Vec<(u8, u8)>) -> bool {
        let n = 16;
        let mut g = graph(n, n);
        pairs.iter().all(|&(u, v)| {
            let (u, v) = (u as usize % n, v as usize % n);
            if !g.has_empty_slot(u) {
                g.add_bucket(u).unwrap();
            }
            g.add_edge(u, v).unwrap();
            let added = g.has_edge(u, v);
            g.del_edge(u, v);
            added && !g.has_edge(u, v) && g.num_edges() == 0
        })
    }
}
