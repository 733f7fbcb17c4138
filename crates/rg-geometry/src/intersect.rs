//! Pairwise polyline intersection.
//!
//! Segment-level intersections come from `geo::line_intersection`.  The
//! per-segment results are folded into a single [`Crossing`] verdict for the
//! two polylines; only [`Crossing::Single`] yields a usable split point.

use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::Line;

use rg_core::Coord;

use crate::line::coords_equal;

/// How two polylines meet.
#[derive(Clone, Debug, PartialEq)]
pub enum Crossing {
    /// No common point.
    Disjoint,
    /// They meet only at endpoints shared by both lines (already one node).
    Touch,
    /// Exactly one usable meeting point.
    Single(Coord),
    /// Several distinct meeting points; not usable as a single split point.
    Multiple(Vec<Coord>),
    /// At least one pair of segments overlaps collinearly.
    Overlap,
}

impl Crossing {
    /// The split point, if there is exactly one.
    pub fn single(&self) -> Option<Coord> {
        match self {
            Crossing::Single(p) => Some(*p),
            _ => None,
        }
    }

    /// `true` for outcomes the builder reports and skips.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Crossing::Multiple(_) | Crossing::Overlap)
    }
}

/// Return the single intersection point of `a` and `b`, or `None` when they
/// are disjoint, only touch at shared endpoints, overlap collinearly, or
/// meet at more than one point.
pub fn intersect(a: &[Coord], b: &[Coord], eps: f64) -> Option<Coord> {
    let crossing = classify_intersection(a, b, eps);
    if crossing.is_ambiguous() {
        log::debug!("ignoring ambiguous intersection: {crossing:?}");
    }
    crossing.single()
}

/// Classify how polylines `a` and `b` meet.
///
/// Meeting points are deduplicated within `eps` (a crossing at a shared
/// vertex shows up once per adjacent segment).  A point that is an endpoint
/// of both lines is dropped: the two lines already share that node.
pub fn classify_intersection(a: &[Coord], b: &[Coord], eps: f64) -> Crossing {
    let mut points: Vec<Coord> = Vec::new();

    for sa in a.windows(2) {
        let la = to_line(sa[0], sa[1]);
        for sb in b.windows(2) {
            if !boxes_overlap(sa, sb, eps) {
                continue;
            }
            match line_intersection(la, to_line(sb[0], sb[1])) {
                None => {}
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    let p = Coord::new(intersection.x, intersection.y);
                    if !points.iter().any(|&q| coords_equal(p, q, eps)) {
                        points.push(p);
                    }
                }
                Some(LineIntersection::Collinear { .. }) => return Crossing::Overlap,
            }
        }
    }

    if points.is_empty() {
        return Crossing::Disjoint;
    }

    points.retain(|&p| !(is_endpoint(a, p, eps) && is_endpoint(b, p, eps)));
    match points.len() {
        0 => Crossing::Touch,
        1 => Crossing::Single(points[0]),
        _ => Crossing::Multiple(points),
    }
}

#[inline]
fn to_line(a: Coord, b: Coord) -> Line<f64> {
    Line::new(geo::coord! { x: a.lon, y: a.lat }, geo::coord! { x: b.lon, y: b.lat })
}

#[inline]
fn is_endpoint(line: &[Coord], p: Coord, eps: f64) -> bool {
    match (line.first(), line.last()) {
        (Some(&first), Some(&last)) => coords_equal(first, p, eps) || coords_equal(last, p, eps),
        _ => false,
    }
}

/// Cheap bounding-box rejection between two segments, padded by `eps`.
#[inline]
fn boxes_overlap(sa: &[Coord], sb: &[Coord], eps: f64) -> bool {
    let (a_min_x, a_max_x) = (sa[0].lon.min(sa[1].lon), sa[0].lon.max(sa[1].lon));
    let (a_min_y, a_max_y) = (sa[0].lat.min(sa[1].lat), sa[0].lat.max(sa[1].lat));
    let (b_min_x, b_max_x) = (sb[0].lon.min(sb[1].lon), sb[0].lon.max(sb[1].lon));
    let (b_min_y, b_max_y) = (sb[0].lat.min(sb[1].lat), sb[0].lat.max(sb[1].lat));
    a_min_x <= b_max_x + eps
        && b_min_x <= a_max_x + eps
        && a_min_y <= b_max_y + eps
        && b_min_y <= a_max_y + eps
}
