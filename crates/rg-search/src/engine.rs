//! `SearchEngine`: one entry point for every strategy over one graph.

use std::fmt;
use std::str::FromStr;

use rg_core::{CancelToken, CoreError, NodeId, SearchConfig, SearchRng};
use rg_graph::Graph;

use crate::alternatives::{diverse_paths, randomized_paths};
use crate::budget::Budget;
use crate::kshortest::k_shortest_paths;
use crate::path::Path;
use crate::router::{Blocked, Heuristic, admissible_scale, check_nodes, shortest_path};
use crate::{SearchError, SearchResult};

// ── Strategy ──────────────────────────────────────────────────────────────────

/// Which search a query runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Cost-only shortest path.  Ignores `k`.
    #[default]
    Shortest,
    /// Heuristic-guided shortest path.  Ignores `k`.
    #[cfg_attr(feature = "serde", serde(rename = "astar"))]
    AStar,
    /// Up to `k` loopless paths in cost order.
    KShortest,
    /// Up to `k` paths discouraged from reusing edges.
    Diverse,
    /// `k` paths over randomly perturbed weights.
    Randomized,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Shortest,
        Strategy::AStar,
        Strategy::KShortest,
        Strategy::Diverse,
        Strategy::Randomized,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Shortest   => "shortest",
            Strategy::AStar      => "astar",
            Strategy::KShortest  => "k_shortest",
            Strategy::Diverse    => "diverse",
            Strategy::Randomized => "randomized",
        }
    }
}

impl FromStr for Strategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase().replace('-', "_");
        Strategy::ALL
            .into_iter()
            .find(|st| st.as_str() == wanted)
            .ok_or_else(|| CoreError::Parse(format!("unknown strategy `{s}`")))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SearchEngine ──────────────────────────────────────────────────────────────

/// Read-only search over one graph.
///
/// Cheap to construct once the admissible scale is known; build one per
/// snapshot and share it, or one per query.
pub struct SearchEngine<'g> {
    graph:  &'g Graph,
    config: SearchConfig,
    scale:  f64,
    cancel: CancelToken,
}

impl<'g> SearchEngine<'g> {
    /// Computes the admissible heuristic scale for `graph` (one pass over
    /// the edges).
    pub fn new(graph: &'g Graph, config: SearchConfig) -> Self {
        let scale = admissible_scale(graph, &graph.edge_weight);
        Self::with_scale(graph, config, scale)
    }

    /// Reuse a scale computed earlier for the same graph.
    pub fn with_scale(graph: &'g Graph, config: SearchConfig, scale: f64) -> Self {
        Self { graph, config, scale, cancel: CancelToken::new() }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn shortest(&self, from: NodeId, to: NodeId) -> SearchResult<Path> {
        self.single(from, to, Heuristic::None)
    }

    pub fn astar(&self, from: NodeId, to: NodeId) -> SearchResult<Path> {
        self.single(from, to, Heuristic::great_circle(self.scale))
    }

    pub fn k_shortest(&self, from: NodeId, to: NodeId, k: usize) -> SearchResult<Vec<Path>> {
        k_shortest_paths(self.graph, from, to, k, Heuristic::great_circle(self.scale), &mut self.budget())
    }

    pub fn diverse(&self, from: NodeId, to: NodeId, k: usize) -> SearchResult<Vec<Path>> {
        diverse_paths(
            self.graph,
            from,
            to,
            k,
            self.config.diverse_penalty,
            Heuristic::great_circle(self.scale),
            &mut self.budget(),
        )
    }

    /// Seeded from the config, so the same query gives the same ensemble.
    pub fn randomized(&self, from: NodeId, to: NodeId, k: usize) -> SearchResult<Vec<Path>> {
        let mut rng = SearchRng::new(self.config.seed);
        randomized_paths(
            self.graph,
            from,
            to,
            k,
            (self.config.ensemble_min, self.config.ensemble_max),
            self.scale,
            &mut rng,
            &mut self.budget(),
        )
    }

    /// Run `strategy`.  Single-path strategies return one path whatever
    /// `k` is, but still reject `k == 0`.
    pub fn run(&self, strategy: Strategy, from: NodeId, to: NodeId, k: usize) -> SearchResult<Vec<Path>> {
        self.config.validate()?;
        if k == 0 {
            return Err(SearchError::InvalidK);
        }
        log::debug!("search {strategy} {from}→{to} k={k}");
        match strategy {
            Strategy::Shortest   => self.shortest(from, to).map(|p| vec![p]),
            Strategy::AStar      => self.astar(from, to).map(|p| vec![p]),
            Strategy::KShortest  => self.k_shortest(from, to, k),
            Strategy::Diverse    => self.diverse(from, to, k),
            Strategy::Randomized => self.randomized(from, to, k),
        }
    }

    // ── Private ───────────────────────────────────────────────────────────

    fn single(&self, from: NodeId, to: NodeId, heuristic: Heuristic) -> SearchResult<Path> {
        check_nodes(self.graph, from, to)?;
        if self.cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }
        shortest_path(self.graph, &self.graph.edge_weight, from, to, heuristic, &Blocked::default())
            .ok_or(SearchError::NoPath { from, to })
    }

    fn budget(&self) -> Budget {
        Budget::new(&self.config, self.cancel.clone())
    }
}
