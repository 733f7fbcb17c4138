//! Structured build diagnostics and the observer that receives them.
//!
//! Diagnostics describe what the builder did to individual features
//! (dropped, left unsplit, merged).  They are consumed by logging or by the
//! caller, never by control flow.

use std::fmt;

use thiserror::Error;

use rg_core::{Coord, FeatureId, Profile};
use rg_geometry::GeometryError;

// ── Phases ────────────────────────────────────────────────────────────────────

/// The states of one build cycle, in order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuildPhase {
    Collecting,
    Indexed,
    Splitting,
    Merging,
    Finalized,
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ── Caps ──────────────────────────────────────────────────────────────────────

/// Which safety valve tripped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cap {
    Candidates,
    Intersections,
}

/// A feature exceeded a candidate or intersection limit.  Always recovered
/// by emitting the feature unsplit.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
#[error("{feature}: {count} {cap:?} exceeds limit {limit}, left unsplit")]
pub struct CapExceeded {
    pub feature: FeatureId,
    pub cap:     Cap,
    pub count:   usize,
    pub limit:   usize,
}

// ── Diagnostic ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// Dropped during collection: unusable geometry.
    InvalidGeometry { feature: FeatureId, error: GeometryError },

    /// Dropped during collection: negative or non-finite cost.
    InvalidAttribute { feature: FeatureId, reason: String },

    /// Dropped during collection: excluded by the travel profile.
    FilteredByProfile { feature: FeatureId, profile: Profile },

    /// Kept unsplit: too many candidates or intersection points.
    CapExceeded(CapExceeded),

    /// A neighbour overlaps collinearly or crosses more than once; that
    /// neighbour contributes no split point.
    AmbiguousIntersection { feature: FeatureId, other: FeatureId, points: usize, overlap: bool },

    /// Kept unsplit: cutting failed.
    SplitFailed { feature: FeatureId, error: GeometryError },

    /// Several distinct coordinates collapsed into one node.  `chained` is
    /// set when the cluster is wider than the tolerance (linked through
    /// intermediate coordinates).
    NodesMerged { canonical: Coord, members: usize, chained: bool },

    /// A segment whose two ends merged into the same node was not turned
    /// into an edge.
    CollapsedSegment { feature: FeatureId, at: Coord },
}

impl Diagnostic {
    /// The feature this diagnostic is about, if it concerns a single one.
    pub fn feature(&self) -> Option<FeatureId> {
        match self {
            Diagnostic::InvalidGeometry { feature, .. }
            | Diagnostic::InvalidAttribute { feature, .. }
            | Diagnostic::FilteredByProfile { feature, .. }
            | Diagnostic::AmbiguousIntersection { feature, .. }
            | Diagnostic::SplitFailed { feature, .. }
            | Diagnostic::CollapsedSegment { feature, .. } => Some(*feature),
            Diagnostic::CapExceeded(cap) => Some(cap.feature),
            Diagnostic::NodesMerged { .. } => None,
        }
    }

    /// `true` when the feature was dropped from the graph entirely.
    pub fn is_drop(&self) -> bool {
        matches!(
            self,
            Diagnostic::InvalidGeometry { .. }
                | Diagnostic::InvalidAttribute { .. }
                | Diagnostic::FilteredByProfile { .. }
        )
    }

    /// `true` for outcomes that lose input data or topology.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Diagnostic::InvalidGeometry { .. }
                | Diagnostic::InvalidAttribute { .. }
                | Diagnostic::CapExceeded(_)
                | Diagnostic::SplitFailed { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidGeometry { feature, error } => {
                write!(f, "{feature} dropped: {error}")
            }
            Diagnostic::InvalidAttribute { feature, reason } => {
                write!(f, "{feature} dropped: {reason}")
            }
            Diagnostic::FilteredByProfile { feature, profile } => {
                write!(f, "{feature} excluded for profile {profile}")
            }
            Diagnostic::CapExceeded(cap) => write!(f, "{cap}"),
            Diagnostic::AmbiguousIntersection { feature, other, points, overlap } => {
                if *overlap {
                    write!(f, "{feature} overlaps {other}, no split point taken")
                } else {
                    write!(f, "{feature} meets {other} at {points} points, no split point taken")
                }
            }
            Diagnostic::SplitFailed { feature, error } => {
                write!(f, "{feature} left unsplit: {error}")
            }
            Diagnostic::NodesMerged { canonical, members, chained } => {
                write!(f, "{members} coordinates merged into {canonical}")?;
                if *chained {
                    f.write_str(" (chained)")?;
                }
                Ok(())
            }
            Diagnostic::CollapsedSegment { feature, at } => {
                write!(f, "{feature} has a zero-length segment at {at}")
            }
        }
    }
}

// ── Stats ─────────────────────────────────────────────────────────────────────

/// Counters for one completed build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub features_in:        usize,
    pub features_valid:     usize,
    pub features_dropped:   usize,
    pub features_split:     usize,
    pub features_capped:    usize,
    pub sub_features:       usize,
    pub split_points:       usize,
    pub coords_merged:      usize,
    pub collapsed_segments: usize,
    pub nodes:              usize,
    pub edges:              usize,
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Callbacks invoked by [`GraphBuilder::build`](crate::GraphBuilder::build).
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Diagnostics arrive in feature order
/// even when splitting runs in parallel.
pub trait BuildObserver {
    /// Called when the builder enters a phase.
    fn on_phase(&mut self, _phase: BuildPhase) {}

    fn on_diagnostic(&mut self, _diagnostic: &Diagnostic) {}

    /// Called once, after the graph is finalized.
    fn on_finalized(&mut self, _stats: &BuildStats) {}
}

/// A [`BuildObserver`] that does nothing.
pub struct NoopObserver;

impl BuildObserver for NoopObserver {}

/// Forwards everything to the `log` facade.
pub struct LogObserver;

impl BuildObserver for LogObserver {
    fn on_phase(&mut self, phase: BuildPhase) {
        log::debug!("graph build: entering {phase}");
    }

    fn on_diagnostic(&mut self, diagnostic: &Diagnostic) {
        if diagnostic.is_warning() {
            log::warn!("{diagnostic}");
        } else {
            log::debug!("{diagnostic}");
        }
    }

    fn on_finalized(&mut self, stats: &BuildStats) {
        log::info!(
            "graph built: {} nodes, {} edges from {}/{} features ({} split, {} capped, {} coordinates merged)",
            stats.nodes,
            stats.edges,
            stats.features_valid,
            stats.features_in,
            stats.features_split,
            stats.features_capped,
            stats.coords_merged,
        );
    }
}

/// Keeps every phase, diagnostic and the final stats.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    pub phases:      Vec<BuildPhase>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats:       Option<BuildStats>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics about one feature.
    pub fn for_feature(&self, feature: FeatureId) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.feature() == Some(feature))
    }
}

impl BuildObserver for CollectingObserver {
    fn on_phase(&mut self, phase: BuildPhase) {
        self.phases.push(phase);
    }

    fn on_diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }

    fn on_finalized(&mut self, stats: &BuildStats) {
        self.stats = Some(stats.clone());
    }
}
