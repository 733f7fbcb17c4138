//! Nearest-node index over graph node coordinates.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use rg_core::{Coord, NodeId};

/// Entry stored in the R-tree: a 2-D `[lon, lat]` point with its `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lon/lat degrees.  Matches the planar
    /// tolerance model used everywhere else; the great-circle distance of
    /// the winner is reported separately by [`Nearest::distance_m`].
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlon = self.point[0] - point[0];
        let dlat = self.point[1] - point[1];
        dlon * dlon + dlat * dlat
    }
}

/// Result of a nearest-node query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Nearest {
    pub node:         NodeId,
    pub coord:        Coord,
    /// Planar distance from the query point, in degrees.
    pub distance_deg: f64,
    /// Great-circle distance from the query point, in metres.
    pub distance_m:   f64,
}

/// Static R-tree over node positions.  Node `i` of the input slice gets
/// `NodeId(i)`.
///
/// Queries at a non-finite position match nothing.  Equidistant nodes are
/// ordered by `NodeId`, so answers do not depend on the tree layout.
pub struct PointIndex {
    tree: RTree<NodeEntry>,
    len:  usize,
}

impl PointIndex {
    /// Bulk-load for O(N log N) construction.
    pub fn build(positions: &[Coord]) -> Self {
        let entries: Vec<NodeEntry> = positions
            .iter()
            .zip((0..).map(NodeId))
            .map(|(c, id)| NodeEntry { point: c.to_array(), id })
            .collect();
        Self { tree: RTree::bulk_load(entries), len: positions.len() }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The node nearest to `pos`.  Returns `None` if the index is empty or
    /// `pos` is not finite.
    pub fn nearest(&self, pos: Coord) -> Option<Nearest> {
        let (_, entry) = self.ranked(pos, 1).into_iter().next()?;
        let coord = Coord::from(entry.point);
        Some(Nearest {
            node:         entry.id,
            coord,
            distance_deg: pos.planar_distance(coord),
            distance_m:   pos.distance_m(coord),
        })
    }

    /// Up to `k` nearest nodes to `pos`, sorted by ascending distance.
    pub fn k_nearest(&self, pos: Coord, k: usize) -> Vec<NodeId> {
        self.ranked(pos, k).into_iter().map(|(_, e)| e.id).collect()
    }

    /// The `k` best entries by `(distance, NodeId)`.  Pulls past the k-th
    /// entry while distances tie so that a lower id is never cut off.
    fn ranked(&self, pos: Coord, k: usize) -> Vec<(f64, &NodeEntry)> {
        if k == 0 || !pos.is_finite() {
            return Vec::new();
        }
        let mut hits: Vec<(f64, &NodeEntry)> = Vec::with_capacity(k);
        for (entry, d2) in self.tree.nearest_neighbor_iter_with_distance_2(&pos.to_array()) {
            if hits.len() >= k && d2 > hits[k - 1].0 {
                break;
            }
            hits.push((d2, entry));
        }
        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.id.cmp(&b.1.id)));
        hits.truncate(k);
        hits
    }

    /// All nodes inside the per-axis tolerance box around `pos`, in
    /// ascending `NodeId` order.
    pub fn within(&self, pos: Coord, eps: f64) -> Vec<NodeId> {
        if !pos.is_finite() {
            return Vec::new();
        }
        let bbox = AABB::from_corners([pos.lon - eps, pos.lat - eps], [pos.lon + eps, pos.lat + eps]);
        let mut out: Vec<NodeId> = self.tree.locate_in_envelope(&bbox).map(|e| e.id).collect();
        out.sort_unstable();
        out
    }
}
