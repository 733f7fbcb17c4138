//! Polyline basics: tolerance equality, validation, and point location.

use rg_core::Coord;

use crate::{GeometryError, GeometryResult};

/// Per-axis absolute-difference comparison.
///
/// Not a geodesic distance test: `eps` is in degrees on each axis, so it
/// is only an approximation for small `eps` in a locally flat projection.
#[inline]
pub fn coords_equal(a: Coord, b: Coord, eps: f64) -> bool {
    a.approx_eq(b, eps)
}

/// Check that `coords` is a usable line string: at least two coordinates,
/// all finite, and not all coincident within `eps`.
pub fn validate_line(coords: &[Coord], eps: f64) -> GeometryResult<()> {
    if coords.len() < 2 {
        return Err(GeometryError::TooFewPoints { got: coords.len() });
    }
    if let Some(index) = coords.iter().position(|c| !c.is_finite()) {
        return Err(GeometryError::NonFinite { index });
    }
    let first = coords[0];
    if coords.iter().all(|&c| coords_equal(c, first, eps)) {
        return Err(GeometryError::Degenerate);
    }
    Ok(())
}

/// Planar length of the line in degrees.
pub fn line_length(coords: &[Coord]) -> f64 {
    coords.windows(2).map(|w| w[0].planar_distance(w[1])).sum()
}

/// Where a point projects onto a polyline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Location {
    /// Index of the segment `coords[segment] .. coords[segment + 1]`.
    pub segment: usize,
    /// Fraction along that segment, clamped to `[0, 1]`.
    pub t: f64,
    /// The projected coordinate.
    pub projected: Coord,
    /// Planar distance from the query point to `projected`, in degrees.
    pub distance: f64,
    /// Planar distance from the start of the line to `projected`.
    pub along: f64,
}

/// Project `point` onto the closest segment of `coords`.
///
/// Ties go to the earliest segment.  Returns `None` for lines with fewer
/// than two coordinates.
pub fn locate(coords: &[Coord], point: Coord) -> Option<Location> {
    let mut best: Option<Location> = None;
    let mut walked = 0.0;

    for (segment, w) in coords.windows(2).enumerate() {
        let (a, b) = (w[0], w[1]);
        let (dx, dy) = (b.lon - a.lon, b.lat - a.lat);
        let len2 = dx * dx + dy * dy;
        let t = if len2 > 0.0 {
            (((point.lon - a.lon) * dx + (point.lat - a.lat) * dy) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let projected = Coord::new(a.lon + t * dx, a.lat + t * dy);
        let distance = point.planar_distance(projected);
        let seg_len = len2.sqrt();

        if best.is_none_or(|b| distance < b.distance) {
            best = Some(Location { segment, t, projected, distance, along: walked + t * seg_len });
        }
        walked += seg_len;
    }
    best
}
