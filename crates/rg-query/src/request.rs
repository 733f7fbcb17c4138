//! Query input and output records.

use rg_core::Coord;
use rg_graph::Graph;
use rg_search::{Path, Strategy};

fn default_k() -> usize {
    1
}

/// Two points, a strategy and how many paths to ask for.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRequest {
    pub source:   Coord,
    pub target:   Coord,
    #[cfg_attr(feature = "serde", serde(default))]
    pub strategy: Strategy,
    #[cfg_attr(feature = "serde", serde(default = "default_k"))]
    pub k:        usize,
}

impl RouteRequest {
    /// Single shortest path.
    pub fn new(source: Coord, target: Coord) -> Self {
        Self { source, target, strategy: Strategy::default(), k: default_k() }
    }

    pub fn with_strategy(mut self, strategy: Strategy, k: usize) -> Self {
        self.strategy = strategy;
        self.k = k;
        self
    }
}

/// One path as the caller sees it: coordinates in travel order and the
/// total cost.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePath {
    /// `(lon, lat)` of every node on the path.
    pub coords: Vec<Coord>,
    pub cost:   f64,
}

impl RoutePath {
    pub fn from_path(graph: &Graph, path: &Path) -> Self {
        Self { coords: path.coords(graph), cost: path.cost }
    }

    /// `[lon, lat]` pairs, the GeoJSON position layout.
    pub fn positions(&self) -> Vec<[f64; 2]> {
        self.coords.iter().map(|c| c.to_array()).collect()
    }
}
