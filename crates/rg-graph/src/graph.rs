//! Immutable routable graph and its assembler.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_*[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays are sorted by source node and indexed by `EdgeId`.  The
//! sort is stable, so within one node edges keep the order in which they
//! were added: neighbour iteration is deterministic for a given input.

use rg_core::{Coord, CoreResult, EdgeId, FeatureId, NodeId};

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Directed weighted graph in CSR format.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`GraphAssembler`] or
/// [`GraphBuilder`](crate::GraphBuilder).  Never mutated after construction:
/// searches that need different weights work on a private copy of
/// `edge_weight`.
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Canonical coordinate of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Coord>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId) ─────────────────────────────────────
    /// Source node of each edge.  Required for path reconstruction.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Non-negative traversal cost.
    pub edge_weight: Vec<f64>,

    /// `true` when the edge came from a one-way feature (no reverse twin).
    pub edge_oneway: Vec<bool>,

    /// Input feature the edge was cut from.
    pub edge_feature: Vec<FeatureId>,
}

impl Graph {
    /// A graph with no nodes or edges.
    pub fn empty() -> Self {
        GraphAssembler::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()];
        let end   = self.node_out_start[node.index() + 1];
        (start..end).map(EdgeId)
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    #[inline]
    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    #[inline]
    pub fn position(&self, node: NodeId) -> Coord {
        self.node_pos[node.index()]
    }

    /// All edges `from → to`, in CSR order (parallel edges are possible when
    /// two features connect the same pair of nodes).
    pub fn edges_between(&self, from: NodeId, to: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.out_edges(from).filter(move |e| self.edge_to[e.index()] == to)
    }

    /// Great-circle length of an edge in metres.
    #[inline]
    pub fn edge_length_m(&self, edge: EdgeId) -> f64 {
        let from = self.node_pos[self.edge_from[edge.index()].index()];
        let to   = self.node_pos[self.edge_to[edge.index()].index()];
        from.distance_m(to)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// First node whose coordinate equals `pos` within `eps` on both axes.
    ///
    /// Linear scan; use a `PointIndex` for repeated queries.
    pub fn node_near(&self, pos: Coord, eps: f64) -> Option<NodeId> {
        self.node_pos
            .iter()
            .zip((0..).map(NodeId))
            .find_map(|(&c, id)| c.approx_eq(pos, eps).then_some(id))
    }

    /// Coordinates of a node sequence, in order.
    pub fn coords_of(&self, nodes: &[NodeId]) -> Vec<Coord> {
        nodes.iter().map(|&n| self.node_pos[n.index()]).collect()
    }
}

// ── GraphAssembler ────────────────────────────────────────────────────────────

/// Construct a [`Graph`] incrementally, then call [`build`](Self::build).
///
/// Accepts nodes and directed edges in any order.  `build()` stable-sorts
/// edges by source node and constructs the CSR arrays.
///
/// # Example
///
/// ```
/// use rg_core::{Coord, FeatureId};
/// use rg_graph::GraphAssembler;
///
/// let mut a = GraphAssembler::new();
/// let x = a.add_node(Coord::new(73.05, 33.60)).unwrap();
/// let y = a.add_node(Coord::new(73.06, 33.61)).unwrap();
/// a.add_link(x, y, 5.0, FeatureId(0));
/// let graph = a.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // both directions
/// ```
pub struct GraphAssembler {
    nodes:     Vec<Coord>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:    NodeId,
    to:      NodeId,
    weight:  f64,
    oneway:  bool,
    feature: FeatureId,
}

impl GraphAssembler {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_edges: Vec::new() }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: Coord) -> CoreResult<NodeId> {
        let id = NodeId::from_index(self.nodes.len())?;
        self.nodes.push(pos);
        Ok(id)
    }

    /// Add a **directed** edge from `from` to `to`.
    pub fn add_directed_edge(
        &mut self,
        from:    NodeId,
        to:      NodeId,
        weight:  f64,
        oneway:  bool,
        feature: FeatureId,
    ) {
        self.raw_edges.push(RawEdge { from, to, weight, oneway, feature });
    }

    /// Add edges in **both directions** with equal weight.
    pub fn add_link(&mut self, a: NodeId, b: NodeId, weight: f64, feature: FeatureId) {
        self.add_directed_edge(a, b, weight, false, feature);
        self.add_directed_edge(b, a, weight, false, feature);
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the assembler and produce a [`Graph`].
    ///
    /// Time complexity: O(E log E) for the edge sort.
    pub fn build(self) -> Graph {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Stable: edges of one node keep insertion order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:    Vec<NodeId>    = raw.iter().map(|e| e.from).collect();
        let edge_to:      Vec<NodeId>    = raw.iter().map(|e| e.to).collect();
        let edge_weight:  Vec<f64>       = raw.iter().map(|e| e.weight).collect();
        let edge_oneway:  Vec<bool>      = raw.iter().map(|e| e.oneway).collect();
        let edge_feature: Vec<FeatureId> = raw.iter().map(|e| e.feature).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        Graph {
            node_pos: self.nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_weight,
            edge_oneway,
            edge_feature,
        }
    }
}

impl Default for GraphAssembler {
    fn default() -> Self {
        Self::new()
    }
}
