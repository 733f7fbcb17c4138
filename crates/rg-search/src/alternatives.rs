//! Heuristic alternatives: edge-penalizing diverse paths and randomized
//! weight ensembles.
//!
//! Both search on a private copy of the edge weights; the shared graph is
//! never touched.  Returned paths are costed on the graph's own weights.

use rg_core::{NodeId, SearchRng};
use rg_graph::Graph;

use crate::budget::Budget;
use crate::path::{Path, cost_of};
use crate::router::{Blocked, Heuristic, check_nodes, shortest_path};
use crate::{SearchError, SearchResult};

/// Greedy diverse paths: after each search, multiply the weight of every
/// edge it used by `penalty` (> 1) and search again.
///
/// Stops after `k` paths, when the budget runs out, or (never, in practice)
/// when the target becomes unreachable.  Paths may repeat when the penalty
/// is too small to change the optimum.  Only the first path is guaranteed
/// optimal.
pub fn diverse_paths(
    graph:     &Graph,
    from:      NodeId,
    to:        NodeId,
    k:         usize,
    penalty:   f64,
    heuristic: Heuristic,
    budget:    &mut Budget,
) -> SearchResult<Vec<Path>> {
    if k == 0 {
        return Err(SearchError::InvalidK);
    }
    check_nodes(graph, from, to)?;
    if from == to {
        return Ok(vec![Path::trivial(from)]);
    }

    // Penalties only raise weights, so a heuristic admissible for the
    // original weights stays admissible.
    let mut weights = graph.edge_weight.clone();
    let mut out: Vec<Path> = Vec::with_capacity(k);

    while out.len() < k {
        if !budget.spend()? {
            log::warn!("diverse {from}→{to}: budget exhausted, returning {} path(s)", out.len());
            break;
        }
        let Some(mut path) = shortest_path(graph, &weights, from, to, heuristic, &Blocked::default()) else {
            break;
        };
        for e in &path.edges {
            weights[e.index()] *= penalty;
        }
        path.cost = cost_of(&path.edges, &graph.edge_weight);
        out.push(path);
    }

    if out.is_empty() {
        // Reachability does not depend on weights: nothing was found because
        // there is nothing to find, or because the budget allowed no search.
        return shortest_path(graph, &graph.edge_weight, from, to, Heuristic::None, &Blocked::default())
            .map(|p| vec![p])
            .ok_or(SearchError::NoPath { from, to });
    }
    Ok(out)
}

/// Randomized ensemble: `k` independent trials, each scaling every edge
/// weight by a factor drawn uniformly from `[lo, hi]` and taking the
/// shortest path on the result.  Duplicates are kept.
///
/// `base_scale` is the admissible scale of the unperturbed weights; trials
/// use `base_scale × lo`, which stays admissible.  The outcome depends only
/// on `rng`'s seed, also with the `parallel` feature.
#[allow(clippy::too_many_arguments)]
pub fn randomized_paths(
    graph:      &Graph,
    from:       NodeId,
    to:         NodeId,
    k:          usize,
    (lo, hi):   (f64, f64),
    base_scale: f64,
    rng:        &mut SearchRng,
    budget:     &mut Budget,
) -> SearchResult<Vec<Path>> {
    if k == 0 {
        return Err(SearchError::InvalidK);
    }
    check_nodes(graph, from, to)?;
    if from == to {
        return Ok(vec![Path::trivial(from)]);
    }
    let heuristic = Heuristic::great_circle(base_scale * lo);

    // One child RNG per trial, drawn up front so trial `i` sees the same
    // stream however trials are scheduled.
    let mut trials: Vec<SearchRng> = Vec::with_capacity(k);
    for i in 0..k {
        if !budget.spend()? {
            log::warn!("ensemble {from}→{to}: budget exhausted after {i} trial(s)");
            break;
        }
        trials.push(rng.child(i as u64));
    }

    let run = |mut trial: SearchRng| -> Option<Path> {
        let weights: Vec<f64> = graph.edge_weight.iter().map(|w| w * trial.factor(lo, hi)).collect();
        let mut path = shortest_path(graph, &weights, from, to, heuristic, &Blocked::default())?;
        path.cost = cost_of(&path.edges, &graph.edge_weight);
        Some(path)
    };

    #[cfg(feature = "parallel")]
    let results: Vec<Option<Path>> = {
        use rayon::prelude::*;
        trials.into_par_iter().map(run).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let results: Vec<Option<Path>> = trials.into_iter().map(run).collect();

    let out: Vec<Path> = results.into_iter().flatten().collect();
    if out.is_empty() {
        return shortest_path(graph, &graph.edge_weight, from, to, Heuristic::None, &Blocked::default())
            .map(|p| vec![p])
            .ok_or(SearchError::NoPath { from, to });
    }
    Ok(out)
}
