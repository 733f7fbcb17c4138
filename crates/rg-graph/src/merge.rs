//! Coordinate clustering for the Merging phase.
//!
//! Every vertex of every sub-feature is a node candidate.  Coordinates that
//! are within ε of each other (per axis) are unified with a disjoint-set, so
//! clustering is transitive: if `a ~ b` and `b ~ c` then `a`, `b` and `c`
//! become one node even when `a` and `c` are further than ε apart.  The
//! result does not depend on the order in which pairs are discovered.
//!
//! The canonical coordinate of a cluster is its first-seen member, and nodes
//! are numbered in first-seen order of their canonical coordinate.

use rstar::primitives::GeomWithData;
use rstar::{AABB, RTree};
use rustc_hash::FxHashMap;

use rg_core::{Coord, CoreResult, NodeId};

use crate::Diagnostic;

/// Relative widening of the R-tree query window beyond ε.
const WINDOW_SLACK: f64 = 1e-9;

/// Envelope holding every coordinate `approx_eq` to `c` within `eps`.
///
/// `c ± eps` rounds to the ulp of `c`, which can cut inside the exact box;
/// the pad covers a few ulps of the coordinate plus a relative slack on ε.
/// The window is only a prefilter, `approx_eq` stays the exact test.
pub(crate) fn query_window(c: Coord, eps: f64) -> AABB<[f64; 2]> {
    let magnitude = c.lon.abs().max(c.lat.abs());
    let pad = eps * (1.0 + WINDOW_SLACK) + 4.0 * f64::EPSILON * magnitude;
    AABB::from_corners([c.lon - pad, c.lat - pad], [c.lon + pad, c.lat + pad])
}

// ── DisjointSet ───────────────────────────────────────────────────────────────

/// Union-find over `0..len` with path halving.
///
/// `union` always keeps the smaller index as the root, so the root of every
/// set is its minimum element.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    pub fn new(len: usize) -> Self {
        Self { parent: (0..len).collect() }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Join the sets of `a` and `b`.  Returns `false` if they were already
    /// joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[child] = root;
        true
    }
}

// ── Merge ─────────────────────────────────────────────────────────────────────

/// Result of clustering: one canonical coordinate per node plus a lookup
/// from every input coordinate to its node.
#[derive(Debug)]
pub struct MergeOutcome {
    /// Canonical coordinate of each node.  Indexed by `NodeId`.
    pub nodes: Vec<Coord>,

    /// Distinct input coordinates folded into another node's canonical one.
    pub merged: usize,

    node_of: FxHashMap<CoordKey, NodeId>,
}

impl MergeOutcome {
    /// Node of an input coordinate.  `None` for coordinates that were not
    /// part of the merge input.
    #[inline]
    pub fn node_of(&self, c: Coord) -> Option<NodeId> {
        self.node_of.get(&CoordKey::of(c)).copied()
    }
}

/// Exact bitwise key.  `+ 0.0` folds `-0.0` into `0.0`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct CoordKey(u64, u64);

impl CoordKey {
    #[inline]
    fn of(c: Coord) -> Self {
        CoordKey((c.lon + 0.0).to_bits(), (c.lat + 0.0).to_bits())
    }
}

/// Cluster `coords` within `eps` and number the clusters.
///
/// Returns the outcome and one [`Diagnostic::NodesMerged`] per cluster that
/// absorbed more than one distinct coordinate, in node order.  Fails only
/// when the clusters outnumber the node id range.
pub fn merge_coords(
    coords: impl IntoIterator<Item = Coord>,
    eps: f64,
) -> CoreResult<(MergeOutcome, Vec<Diagnostic>)> {
    // Exact duplicates first: shared vertices produced by splitting are
    // bit-identical and need no tolerance test.
    let mut unique: Vec<Coord> = Vec::new();
    let mut slot_of: FxHashMap<CoordKey, usize> = FxHashMap::default();
    for c in coords {
        slot_of.entry(CoordKey::of(c)).or_insert_with(|| {
            unique.push(c);
            unique.len() - 1
        });
    }

    let tree: RTree<GeomWithData<[f64; 2], usize>> = RTree::bulk_load(
        unique.iter().enumerate().map(|(i, c)| GeomWithData::new(c.to_array(), i)).collect(),
    );

    let mut sets = DisjointSet::new(unique.len());
    for (i, c) in unique.iter().enumerate() {
        let window = query_window(*c, eps);
        for hit in tree.locate_in_envelope(&window) {
            if hit.data > i && c.approx_eq(unique[hit.data], eps) {
                sets.union(i, hit.data);
            }
        }
    }

    // Roots are minimum indices, so they come up in first-seen order.
    let mut node_of_slot: Vec<NodeId> = vec![NodeId::INVALID; unique.len()];
    let mut nodes: Vec<Coord> = Vec::new();
    let mut members: Vec<Vec<usize>> = Vec::new();
    for i in 0..unique.len() {
        let root = sets.find(i);
        if root == i {
            node_of_slot[i] = NodeId::from_index(nodes.len())?;
            nodes.push(unique[i]);
            members.push(vec![i]);
        } else {
            let node = node_of_slot[root];
            node_of_slot[i] = node;
            members[node.index()].push(i);
        }
    }

    let mut diagnostics = Vec::new();
    for (node, cluster) in members.iter().enumerate() {
        if cluster.len() < 2 {
            continue;
        }
        let canonical = nodes[node];
        let chained = cluster.iter().any(|&a| {
            cluster.iter().any(|&b| !unique[a].approx_eq(unique[b], eps))
        });
        diagnostics.push(Diagnostic::NodesMerged { canonical, members: cluster.len(), chained });
    }

    let merged = unique.len() - nodes.len();
    let node_of = slot_of
        .into_iter()
        .map(|(key, slot)| (key, node_of_slot[slot]))
        .collect();

    Ok((MergeOutcome { nodes, merged, node_of }, diagnostics))
}
