//! Per-feature work of the Splitting phase.
//!
//! Each feature is handled independently against a fixed [`LineIndex`], so
//! these functions are safe to run for many features at once.

use rg_core::{BuildConfig, Coord, FeatureId};
use rg_geometry::{Crossing, classify_intersection, coords_equal, split_at_points};
use rg_index::LineIndex;

use crate::{Cap, CapExceeded, Diagnostic};

/// Usable split points of one feature plus the neighbours that produced
/// unusable ones.
#[derive(Debug, Default)]
pub struct SplitPoints {
    pub points:    Vec<Coord>,
    pub ambiguous: Vec<Diagnostic>,
}

/// What splitting did to one feature.
#[derive(Debug)]
pub struct FeatureSplit {
    /// Sub-lines in order along the feature; a single entry when unsplit.
    pub parts:       Vec<Vec<Coord>>,
    pub diagnostics: Vec<Diagnostic>,
    /// Number of split points actually applied.
    pub points:      usize,
    pub capped:      bool,
}

impl FeatureSplit {
    fn unsplit(line: &[Coord], diagnostics: Vec<Diagnostic>, capped: bool) -> Self {
        Self { parts: vec![line.to_vec()], diagnostics, points: 0, capped }
    }

    pub fn is_split(&self) -> bool {
        self.parts.len() > 1
    }
}

/// Find every single-point crossing between `lines[slot]` and its index
/// candidates.
///
/// Points on the feature's own endpoints are left out (nothing to cut
/// there).  Fails with [`CapExceeded`] when the candidate count or the
/// number of distinct points goes over the configured limit.
pub fn collect_split_points(
    slot:   usize,
    lines:  &[&[Coord]],
    ids:    &[FeatureId],
    index:  &LineIndex,
    config: &BuildConfig,
) -> Result<SplitPoints, CapExceeded> {
    let feature = ids[slot];
    let line = lines[slot];
    let eps = config.epsilon_deg;

    let candidates = index.candidates(slot);
    if candidates.len() > config.max_candidates {
        return Err(CapExceeded {
            feature,
            cap:   Cap::Candidates,
            count: candidates.len(),
            limit: config.max_candidates,
        });
    }

    let (first, last) = (line[0], line[line.len() - 1]);
    let mut out = SplitPoints::default();

    for other in candidates {
        match classify_intersection(line, lines[other], eps) {
            Crossing::Disjoint | Crossing::Touch => {}
            Crossing::Single(p) => {
                if coords_equal(p, first, eps) || coords_equal(p, last, eps) {
                    continue;
                }
                if !out.points.iter().any(|&q| coords_equal(p, q, eps)) {
                    out.points.push(p);
                }
            }
            Crossing::Multiple(points) => {
                log::debug!("{feature} meets {} at {} points", ids[other], points.len());
                out.ambiguous.push(Diagnostic::AmbiguousIntersection {
                    feature,
                    other: ids[other],
                    points: points.len(),
                    overlap: false,
                });
            }
            Crossing::Overlap => {
                log::debug!("{feature} overlaps {}", ids[other]);
                out.ambiguous.push(Diagnostic::AmbiguousIntersection {
                    feature,
                    other: ids[other],
                    points: 0,
                    overlap: true,
                });
            }
        }
    }

    if out.points.len() > config.max_intersections {
        return Err(CapExceeded {
            feature,
            cap:   Cap::Intersections,
            count: out.points.len(),
            limit: config.max_intersections,
        });
    }
    Ok(out)
}

/// Split `lines[slot]` at all of its usable crossings.
///
/// Never fails: caps and cutting errors leave the feature whole and say so
/// in [`FeatureSplit::diagnostics`].
pub fn split_feature(
    slot:   usize,
    lines:  &[&[Coord]],
    ids:    &[FeatureId],
    index:  &LineIndex,
    config: &BuildConfig,
) -> FeatureSplit {
    let line = lines[slot];
    let SplitPoints { points, ambiguous } = match collect_split_points(slot, lines, ids, index, config) {
        Ok(found) => found,
        Err(cap) => return FeatureSplit::unsplit(line, vec![Diagnostic::CapExceeded(cap)], true),
    };

    let mut diagnostics = ambiguous;
    if points.is_empty() {
        return FeatureSplit::unsplit(line, diagnostics, false);
    }

    match split_at_points(line, &points, config.epsilon_deg) {
        Ok(parts) => FeatureSplit { points: parts.len() - 1, parts, diagnostics, capped: false },
        Err(error) => {
            diagnostics.push(Diagnostic::SplitFailed { feature: ids[slot], error });
            FeatureSplit::unsplit(line, diagnostics, false)
        }
    }
}
