//! Single-pair shortest path: the `Router` trait, Dijkstra and A*.
//!
//! # Cost units
//!
//! Edge weights are whatever the features' `cost` attribute says.  The A*
//! heuristic is the great-circle distance to the target in metres, scaled by
//! [`admissible_scale`] so that it is expressed in the same unit as the
//! weights and never overestimates the remaining cost.
//!
//! # Determinism
//!
//! The frontier is ordered by `(key, NodeId)`, and out-edges are scanned in
//! CSR order, so equal-cost ties always resolve the same way for a given
//! graph.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rustc_hash::FxHashSet;

use rg_core::{EdgeId, NodeId};
use rg_graph::Graph;

use crate::path::Path;
use crate::{SearchError, SearchResult};

/// Keeps the heuristic strictly below the true bound despite rounding.
const SCALE_MARGIN: f64 = 1.0 - 1e-6;

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable single-pair search.
///
/// Implementations must be `Send + Sync` so one router can serve queries from
/// several threads against the same immutable graph.
pub trait Router: Send + Sync {
    /// Cheapest path from `from` to `to`.  `from == to` yields a trivial path.
    fn route(&self, graph: &Graph, from: NodeId, to: NodeId) -> SearchResult<Path>;
}

/// Cost-only search.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, graph: &Graph, from: NodeId, to: NodeId) -> SearchResult<Path> {
        check_nodes(graph, from, to)?;
        shortest_path(graph, &graph.edge_weight, from, to, Heuristic::None, &Blocked::default())
            .ok_or(SearchError::NoPath { from, to })
    }
}

/// Heuristic-guided search.
pub struct AStarRouter {
    scale: f64,
}

impl AStarRouter {
    /// Router whose heuristic is admissible for `graph`'s own weights.
    pub fn for_graph(graph: &Graph) -> Self {
        Self { scale: admissible_scale(graph, &graph.edge_weight) }
    }

    /// Cost per metre the heuristic assumes.  Must not exceed the cheapest
    /// cost per metre of any edge or results may be suboptimal.
    pub fn with_scale(scale: f64) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Router for AStarRouter {
    fn route(&self, graph: &Graph, from: NodeId, to: NodeId) -> SearchResult<Path> {
        check_nodes(graph, from, to)?;
        let heuristic = Heuristic::GreatCircle { scale: self.scale };
        shortest_path(graph, &graph.edge_weight, from, to, heuristic, &Blocked::default())
            .ok_or(SearchError::NoPath { from, to })
    }
}

pub(crate) fn check_nodes(graph: &Graph, from: NodeId, to: NodeId) -> SearchResult<()> {
    for node in [from, to] {
        if !graph.contains_node(node) {
            return Err(SearchError::NodeNotFound(node));
        }
    }
    Ok(())
}

// ── Search parameters ─────────────────────────────────────────────────────────

/// Lower bound on the remaining cost from a node to the target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Heuristic {
    /// Plain Dijkstra.
    None,
    /// Great-circle metres times `scale`.
    GreatCircle { scale: f64 },
}

impl Heuristic {
    /// A* when `scale` is usable, Dijkstra otherwise.
    pub fn great_circle(scale: f64) -> Self {
        if scale > 0.0 && scale.is_finite() {
            Heuristic::GreatCircle { scale }
        } else {
            Heuristic::None
        }
    }
}

/// Nodes and edges a search must not use.  The source itself is never
/// treated as blocked.
#[derive(Clone, Debug, Default)]
pub struct Blocked {
    pub nodes: FxHashSet<NodeId>,
    pub edges: FxHashSet<EdgeId>,
}

impl Blocked {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Largest `s` such that `s × great_circle_metres(e)` never exceeds
/// `weights[e]` for any edge, shrunk by a small margin.  Zero when some edge
/// of positive length is free, or when no edge has positive length.
pub fn admissible_scale(graph: &Graph, weights: &[f64]) -> f64 {
    let mut best = f64::INFINITY;
    for (&weight, edge) in weights.iter().zip((0..).map(EdgeId)) {
        let length = graph.edge_length_m(edge);
        if length > 0.0 {
            best = best.min(weight / length);
        }
    }
    if best.is_finite() { best * SCALE_MARGIN } else { 0.0 }
}

// ── Core search ───────────────────────────────────────────────────────────────

/// Total order over non-NaN `f64` for the priority queue.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Dijkstra (or A* with a consistent `heuristic`) from `from` to `to` over
/// `weights`, avoiding `blocked`.  `None` when `to` is unreachable.
///
/// `weights` is indexed by `EdgeId` and may be a private copy of
/// `graph.edge_weight`; the returned path is costed on `weights`.
pub fn shortest_path(
    graph:     &Graph,
    weights:   &[f64],
    from:      NodeId,
    to:        NodeId,
    heuristic: Heuristic,
    blocked:   &Blocked,
) -> Option<Path> {
    if from == to {
        return Some(Path::trivial(from));
    }
    if blocked.nodes.contains(&to) {
        return None;
    }

    let target = graph.position(to);
    let h = |node: NodeId| match heuristic {
        Heuristic::None => 0.0,
        Heuristic::GreatCircle { scale } => graph.position(node).distance_m(target) * scale,
    };

    let n = graph.node_count();
    // dist[v] = best known cost from `from` to v.
    let mut dist      = vec![f64::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];
    let mut settled   = vec![false; n];

    dist[from.index()] = 0.0;

    // Min-heap on (g + h, node); NodeId breaks ties deterministically.
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(h(from)), from)));

    while let Some(Reverse((_, node))) = heap.pop() {
        if settled[node.index()] {
            continue;
        }
        settled[node.index()] = true;

        if node == to {
            let edges = reconstruct(graph, &prev_edge, from, to);
            return Some(Path::from_edges(graph, from, edges, weights));
        }

        let cost = dist[node.index()];
        for edge in graph.out_edges(node) {
            if blocked.edges.contains(&edge) {
                continue;
            }
            let neighbor = graph.edge_to[edge.index()];
            if settled[neighbor.index()] || blocked.nodes.contains(&neighbor) {
                continue;
            }
            let new_cost = cost + weights[edge.index()];
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((Cost(new_cost + h(neighbor)), neighbor)));
            }
        }
    }

    None
}

fn reconstruct(graph: &Graph, prev_edge: &[EdgeId], from: NodeId, to: NodeId) -> Vec<EdgeId> {
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        if !e.is_valid() {
            break;
        }
        edges.push(e);
        cur = graph.edge_from[e.index()];
    }
    edges.reverse();
    edges
}
