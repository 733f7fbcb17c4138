//! Loopless k-shortest paths by deviation from already-found paths.
//!
//! For each found path and each node on it, a spur search runs from that
//! node to the target with the path's prefix nodes removed and with the
//! next edge of every found path sharing that prefix blocked.  Every spur
//! result joined to its prefix is a candidate; the cheapest candidate
//! becomes the next path.
//!
//! Because prefix nodes are blocked and each spur search returns a simple
//! path, every result is simple.  Candidates are deduplicated by edge
//! sequence so no path is returned twice.

use rustc_hash::FxHashSet;

use rg_core::{EdgeId, NodeId};
use rg_graph::Graph;

use crate::budget::Budget;
use crate::path::Path;
use crate::router::{Blocked, Heuristic, check_nodes, shortest_path};
use crate::{SearchError, SearchResult};

/// Up to `k` simple paths from `from` to `to` in non-decreasing cost order.
///
/// The first is the shortest path.  Returns fewer than `k` when the graph
/// has no more simple alternatives or the budget runs out (logged at
/// `warn`).  Fails with [`SearchError::NoPath`] if `to` is unreachable.
pub fn k_shortest_paths(
    graph:     &Graph,
    from:      NodeId,
    to:        NodeId,
    k:         usize,
    heuristic: Heuristic,
    budget:    &mut Budget,
) -> SearchResult<Vec<Path>> {
    if k == 0 {
        return Err(SearchError::InvalidK);
    }
    check_nodes(graph, from, to)?;
    let weights = &graph.edge_weight;

    let first = shortest_path(graph, weights, from, to, heuristic, &Blocked::default())
        .ok_or(SearchError::NoPath { from, to })?;
    if first.is_trivial() {
        return Ok(vec![first]);
    }

    let mut found: Vec<Path> = vec![first];
    let mut candidates: Vec<Path> = Vec::new();
    let mut seen: FxHashSet<Vec<EdgeId>> = FxHashSet::default();
    seen.insert(found[0].edges.clone());

    'outer: while found.len() < k {
        let last = found[found.len() - 1].clone();

        for i in 0..last.edges.len() {
            if !budget.spend()? {
                log::warn!(
                    "k-shortest {from}→{to}: search budget exhausted after {} spur searches, returning {} path(s)",
                    budget.used(),
                    found.len(),
                );
                break 'outer;
            }

            let spur = last.nodes[i];
            let root_edges = &last.edges[..i];

            let mut blocked = Blocked::default();
            blocked.nodes.extend(last.nodes[..i].iter().copied());
            for p in &found {
                if p.edges.len() > i && &p.edges[..i] == root_edges {
                    blocked.edges.insert(p.edges[i]);
                }
            }

            let Some(spur_path) = shortest_path(graph, weights, spur, to, heuristic, &blocked) else {
                continue;
            };

            let mut edges = root_edges.to_vec();
            edges.extend_from_slice(&spur_path.edges);
            if seen.insert(edges.clone()) {
                candidates.push(Path::from_edges(graph, from, edges, weights));
            }
        }

        // Cheapest candidate; the earliest one wins ties.
        let Some(best) = candidates
            .iter()
            .enumerate()
            .min_by(|(ia, a), (ib, b)| a.cost.total_cmp(&b.cost).then(ia.cmp(ib)))
            .map(|(i, _)| i)
        else {
            break;
        };
        found.push(candidates.remove(best));
    }

    debug_assert!(found.windows(2).all(|w| w[0].cost <= w[1].cost + 1e-9 * w[1].cost.abs().max(1.0)));
    Ok(found)
}
