//! An immutable graph together with everything derived from it.

use rg_core::Coord;
use rg_graph::Graph;
use rg_index::{Nearest, PointIndex};
use rg_search::admissible_scale;

use crate::{QueryError, QueryResult};

/// A finalized graph, its node index and its A* scale.
///
/// Built once, then shared behind an `Arc`; nothing in it changes after
/// construction.
pub struct Snapshot {
    graph:      Graph,
    points:     PointIndex,
    scale:      f64,
    generation: u64,
}

impl Snapshot {
    pub fn new(graph: Graph, generation: u64) -> Self {
        let points = PointIndex::build(&graph.node_pos);
        let scale = admissible_scale(&graph, &graph.edge_weight);
        Self { graph, points, scale, generation }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn points(&self) -> &PointIndex {
        &self.points
    }

    /// Heuristic scale for A* on this graph's weights.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Publish counter of the service that built this snapshot.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Nearest node to `pos`.  Fails when `pos` is not finite or the graph
    /// is empty.
    pub fn resolve(&self, pos: Coord) -> QueryResult<Nearest> {
        if !pos.is_finite() {
            return Err(QueryError::InvalidCoord(pos));
        }
        self.points.nearest(pos).ok_or(QueryError::NoNode)
    }
}
