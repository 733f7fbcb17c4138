//! `GraphBuilder`: runs the five build phases over a batch of features.
//!
//! # Usage
//!
//! ```rust,ignore
//! let graph = GraphBuilder::new(BuildConfig::default())
//!     .with_cancel(token.clone())
//!     .build(&features, &mut LogObserver)?;
//! ```
//!
//! A build never touches any previously built [`Graph`]: each call returns a
//! fresh instance, and errors leave the caller's current graph as it was.

use rg_core::{BuildConfig, CancelToken, Coord, FeatureId, LineFeature};
use rg_geometry::validate_line;
use rg_index::LineIndex;

use crate::merge::merge_coords;
use crate::split::{FeatureSplit, split_feature};
use crate::{
    BuildError, BuildObserver, BuildPhase, BuildResult, BuildStats, Diagnostic, Graph,
    GraphAssembler,
};

/// A feature that survived the Collecting phase.
struct Collected<'a> {
    id:     FeatureId,
    coords: &'a [Coord],
    oneway: bool,
    cost:   f64,
}

pub struct GraphBuilder {
    config: BuildConfig,
    cancel: CancelToken,
}

impl GraphBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config, cancel: CancelToken::new() }
    }

    /// Abort the build (with [`BuildError::Cancelled`]) once `cancel` fires.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build a graph from `features`.  Feature `i` is `FeatureId(i)` in
    /// diagnostics and on the resulting edges.
    pub fn build<O>(&self, features: &[LineFeature], observer: &mut O) -> BuildResult<Graph>
    where
        O: BuildObserver + ?Sized,
    {
        self.config.validate()?;
        if features.is_empty() {
            return Err(BuildError::NoFeatures);
        }
        let eps = self.config.epsilon_deg;
        let mut stats = BuildStats { features_in: features.len(), ..BuildStats::default() };

        // ── Collecting ────────────────────────────────────────────────────
        observer.on_phase(BuildPhase::Collecting);
        let mut collected: Vec<Collected<'_>> = Vec::with_capacity(features.len());
        for (i, feature) in features.iter().enumerate() {
            self.check_cancel()?;
            let id = FeatureId::from_index(i)?;
            match self.collect(id, feature) {
                Ok(c) => collected.push(c),
                Err(diagnostic) => {
                    stats.features_dropped += 1;
                    observer.on_diagnostic(&diagnostic);
                }
            }
        }
        stats.features_valid = collected.len();
        if collected.is_empty() {
            return Err(BuildError::NoValidFeatures { dropped: stats.features_dropped });
        }

        // ── Indexed ───────────────────────────────────────────────────────
        self.check_cancel()?;
        observer.on_phase(BuildPhase::Indexed);
        let lines: Vec<&[Coord]> = collected.iter().map(|c| c.coords).collect();
        let ids: Vec<FeatureId> = collected.iter().map(|c| c.id).collect();
        let index = LineIndex::build(lines.iter().copied(), eps)?;

        // ── Splitting ─────────────────────────────────────────────────────
        self.check_cancel()?;
        observer.on_phase(BuildPhase::Splitting);
        let splits = self.split_all(&lines, &ids, &index)?;
        for split in &splits {
            for diagnostic in &split.diagnostics {
                observer.on_diagnostic(diagnostic);
            }
            if split.is_split() {
                stats.features_split += 1;
            }
            if split.capped {
                stats.features_capped += 1;
            }
            stats.split_points += split.points;
            stats.sub_features += split.parts.len();
        }

        // ── Merging ───────────────────────────────────────────────────────
        self.check_cancel()?;
        observer.on_phase(BuildPhase::Merging);
        let vertices = splits.iter().flat_map(|s| s.parts.iter().flatten().copied());
        let (merged, merge_diagnostics) = merge_coords(vertices, eps)?;
        for diagnostic in &merge_diagnostics {
            observer.on_diagnostic(diagnostic);
        }
        stats.coords_merged = merged.merged;

        // ── Finalized ─────────────────────────────────────────────────────
        self.check_cancel()?;
        let edge_hint: usize = splits
            .iter()
            .flat_map(|s| s.parts.iter())
            .map(|p| 2 * p.len().saturating_sub(1))
            .sum();
        let mut assembler = GraphAssembler::with_capacity(merged.nodes.len(), edge_hint);
        for &pos in &merged.nodes {
            assembler.add_node(pos)?;
        }

        for (feature, split) in collected.iter().zip(&splits) {
            for part in &split.parts {
                for w in part.windows(2) {
                    let (Some(u), Some(v)) = (merged.node_of(w[0]), merged.node_of(w[1])) else {
                        continue;
                    };
                    if u == v {
                        stats.collapsed_segments += 1;
                        observer.on_diagnostic(&Diagnostic::CollapsedSegment {
                            feature: feature.id,
                            at:      merged.nodes[u.index()],
                        });
                        continue;
                    }
                    assembler.add_directed_edge(u, v, feature.cost, feature.oneway, feature.id);
                    if !feature.oneway {
                        assembler.add_directed_edge(v, u, feature.cost, false, feature.id);
                    }
                }
            }
        }

        let graph = assembler.build();
        stats.nodes = graph.node_count();
        stats.edges = graph.edge_count();
        observer.on_phase(BuildPhase::Finalized);
        observer.on_finalized(&stats);
        Ok(graph)
    }

    // ── Private ───────────────────────────────────────────────────────────

    #[inline]
    fn check_cancel(&self) -> BuildResult<()> {
        if self.cancel.is_cancelled() { Err(BuildError::Cancelled) } else { Ok(()) }
    }

    /// Validate one feature, or explain why it is dropped.
    fn collect<'a>(&self, id: FeatureId, feature: &'a LineFeature) -> Result<Collected<'a>, Diagnostic> {
        let profile = self.config.profile;
        if !profile.allows(&feature.attrs) {
            return Err(Diagnostic::FilteredByProfile { feature: id, profile });
        }
        validate_line(&feature.coords, self.config.epsilon_deg)
            .map_err(|error| Diagnostic::InvalidGeometry { feature: id, error })?;

        let cost = feature.cost();
        if !(cost.is_finite() && cost >= 0.0) {
            return Err(Diagnostic::InvalidAttribute {
                feature: id,
                reason:  format!("cost must be finite and non-negative, got {cost}"),
            });
        }
        Ok(Collected { id, coords: &feature.coords, oneway: feature.is_oneway(), cost })
    }

    #[cfg(not(feature = "parallel"))]
    fn split_all(
        &self,
        lines: &[&[Coord]],
        ids:   &[FeatureId],
        index: &LineIndex,
    ) -> BuildResult<Vec<FeatureSplit>> {
        let mut out = Vec::with_capacity(lines.len());
        for slot in 0..lines.len() {
            self.check_cancel()?;
            out.push(split_feature(slot, lines, ids, index, &self.config));
        }
        Ok(out)
    }

    /// Same result as the sequential version: `collect` keeps slot order.
    #[cfg(feature = "parallel")]
    fn split_all(
        &self,
        lines: &[&[Coord]],
        ids:   &[FeatureId],
        index: &LineIndex,
    ) -> BuildResult<Vec<FeatureSplit>> {
        use rayon::prelude::*;

        (0..lines.len())
            .into_par_iter()
            .map(|slot| {
                if self.cancel.is_cancelled() {
                    None
                } else {
                    Some(split_feature(slot, lines, ids, index, &self.config))
                }
            })
            .collect::<Option<Vec<_>>>()
            .ok_or(BuildError::Cancelled)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(BuildConfig::default())
    }
}
