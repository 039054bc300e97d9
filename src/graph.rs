//! Weighted undirected graph with shortest-path search
//!
//! Nodes are plain indices; adjacency is a sorted-insertion vector per node
//! rather than a hash map, so iteration order (and therefore path choice
//! among equal-cost alternatives) is deterministic for a given build order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Handle to a graph node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// Undirected graph with f64 edge weights
#[derive(Debug, Clone, Default)]
pub struct Graph {
    links: Vec<Vec<(NodeId, f64)>>,
}

/// Min-heap entry ordered by distance, ties broken by node id
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    dist: f64,
    node: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest distance first
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an isolated node
    pub fn add_node(&mut self) -> NodeId {
        self.links.push(Vec::new());
        NodeId(self.links.len() - 1)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Link two nodes with a weight; re-linking updates the weight
    pub fn link(&mut self, a: NodeId, b: NodeId, weight: f64) {
        self.link_directed(a, b, weight);
        self.link_directed(b, a, weight);
    }

    fn link_directed(&mut self, from: NodeId, to: NodeId, weight: f64) {
        let adj = &mut self.links[from.0];
        match adj.iter_mut().find(|(n, _)| *n == to) {
            Some(entry) => entry.1 = weight,
            None => adj.push((to, weight)),
        }
    }

    /// Remove the link between two nodes, if present
    pub fn unlink(&mut self, a: NodeId, b: NodeId) {
        self.links[a.0].retain(|(n, _)| *n != b);
        self.links[b.0].retain(|(n, _)| *n != a);
    }

    /// Neighbors of a node with edge weights
    pub fn neighbours(&self, n: NodeId) -> &[(NodeId, f64)] {
        &self.links[n.0]
    }

    /// Dijkstra shortest path from `start` to `goal`
    ///
    /// Nodes in `exclude` are treated as already visited and will never be
    /// entered (excluding `start` or `goal` themselves makes the search
    /// fail). Returns the node sequence including both endpoints, or `None`
    /// when the goal is unreachable.
    pub fn shortest_path(
        &self,
        start: NodeId,
        goal: NodeId,
        exclude: &[NodeId],
    ) -> Option<Vec<NodeId>> {
        let n = self.links.len();
        if start.0 >= n || goal.0 >= n {
            return None;
        }
        let mut visited = vec![false; n];
        for &e in exclude {
            if e.0 < n {
                visited[e.0] = true;
            }
        }
        if visited[start.0] || visited[goal.0] {
            return None;
        }

        let mut dist = vec![f64::INFINITY; n];
        let mut prev: Vec<Option<NodeId>> = vec![None; n];
        let mut heap = BinaryHeap::new();

        dist[start.0] = 0.0;
        heap.push(QueueEntry {
            dist: 0.0,
            node: start,
        });

        while let Some(QueueEntry { dist: d, node }) = heap.pop() {
            if node == goal {
                return Some(self.trace_path(&prev, goal));
            }
            if visited[node.0] {
                continue;
            }
            visited[node.0] = true;

            for &(next, weight) in &self.links[node.0] {
                if visited[next.0] {
                    continue;
                }
                let score = d + weight;
                if score < dist[next.0] {
                    dist[next.0] = score;
                    prev[next.0] = Some(node);
                    heap.push(QueueEntry {
                        dist: score,
                        node: next,
                    });
                }
            }
        }
        None
    }

    fn trace_path(&self, prev: &[Option<NodeId>], goal: NodeId) -> Vec<NodeId> {
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(p) = prev[current.0] {
            path.push(p);
            current = p;
        }
        path.reverse();
        path
    }
}
