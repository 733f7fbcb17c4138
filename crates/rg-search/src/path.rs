//! The result of a search.

use rg_core::{Coord, EdgeId, NodeId};
use rg_graph::Graph;

/// An ordered walk from a source node to a target node.
///
/// `nodes.len() == edges.len() + 1`; `edges[i]` runs from `nodes[i]` to
/// `nodes[i + 1]`.  `cost` is the sum of the traversed edge weights on the
/// graph as built, even for strategies that searched on modified weights.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
    pub cost:  f64,
}

impl Path {
    /// Zero-length path at `node`.
    pub fn trivial(node: NodeId) -> Self {
        Self { nodes: vec![node], edges: Vec::new(), cost: 0.0 }
    }

    /// Build from an edge sequence starting at `from`, costed with `weights`.
    pub fn from_edges(graph: &Graph, from: NodeId, edges: Vec<EdgeId>, weights: &[f64]) -> Self {
        let mut nodes = Vec::with_capacity(edges.len() + 1);
        nodes.push(from);
        nodes.extend(edges.iter().map(|e| graph.edge_to[e.index()]));
        let cost = cost_of(&edges, weights);
        Self { nodes, edges, cost }
    }

    pub fn source(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn target(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    /// `true` if no node repeats.
    pub fn is_simple(&self) -> bool {
        let mut seen = rustc_hash::FxHashSet::default();
        self.nodes.iter().all(|n| seen.insert(*n))
    }

    /// Coordinates of the visited nodes, in travel order.
    pub fn coords(&self, graph: &Graph) -> Vec<Coord> {
        graph.coords_of(&self.nodes)
    }
}

/// Sum of `weights` over `edges`.
#[inline]
pub fn cost_of(edges: &[EdgeId], weights: &[f64]) -> f64 {
    edges.iter().map(|e| weights[e.index()]).sum()
}
