//! Cutting polylines at points that lie on them.

use rg_core::Coord;

use crate::line::{coords_equal, locate};
use crate::{GeometryError, GeometryResult};

/// Cut `line` at `point`, returning `(head, tail)`.
///
/// `point` must lie on `line` within `eps`; the cut position is the
/// projection of `point` onto the nearest segment.  When the projection
/// coincides with an existing vertex the cut happens at that vertex;
/// otherwise `point` itself is inserted as the new shared vertex, so two
/// lines cut at the same crossing end up with bit-identical coordinates.
///
/// Fails with [`GeometryError::PointOffLine`] when `point` is too far from
/// the line and [`GeometryError::DegenerateSplit`] when the cut falls on
/// the first or last coordinate.
pub fn project_and_split(
    line:  &[Coord],
    point: Coord,
    eps:   f64,
) -> GeometryResult<(Vec<Coord>, Vec<Coord>)> {
    let loc = locate(line, point)
        .ok_or(GeometryError::TooFewPoints { got: line.len() })?;

    if !coords_equal(point, loc.projected, eps) {
        return Err(GeometryError::PointOffLine {
            point,
            distance:  loc.distance,
            tolerance: eps,
        });
    }

    let last = line.len() - 1;
    let (start, end) = (line[loc.segment], line[loc.segment + 1]);

    let cut_vertex = if coords_equal(loc.projected, start, eps) {
        Some(loc.segment)
    } else if coords_equal(loc.projected, end, eps) {
        Some(loc.segment + 1)
    } else {
        None
    };

    match cut_vertex {
        Some(v) if v == 0 || v == last => Err(GeometryError::DegenerateSplit { point }),
        Some(v) => Ok((line[..=v].to_vec(), line[v..].to_vec())),
        None => {
            let mut head = line[..=loc.segment].to_vec();
            head.push(point);
            let mut tail = Vec::with_capacity(line.len() - loc.segment);
            tail.push(point);
            tail.extend_from_slice(&line[loc.segment + 1..]);
            Ok((head, tail))
        }
    }
}

/// Cut `line` at every point in `points`, producing a chain of parts that
/// share their boundary vertices.
///
/// Points within `eps` of the line's own endpoints are ignored (nothing to
/// cut), duplicates within `eps` collapse, and the rest are applied in
/// order of distance along the line.  A cut that lands on the vertex the
/// previous cut already made is skipped.  Returns the unsplit line when no
/// usable points remain.
pub fn split_at_points(
    line:   &[Coord],
    points: &[Coord],
    eps:    f64,
) -> GeometryResult<Vec<Vec<Coord>>> {
    let (Some(&first), Some(&last)) = (line.first(), line.last()) else {
        return Err(GeometryError::TooFewPoints { got: line.len() });
    };

    let mut ordered: Vec<(f64, Coord)> = Vec::with_capacity(points.len());
    for &p in points {
        if coords_equal(p, first, eps) || coords_equal(p, last, eps) {
            continue;
        }
        if ordered.iter().any(|&(_, q)| coords_equal(p, q, eps)) {
            continue;
        }
        let loc = locate(line, p)
            .ok_or(GeometryError::TooFewPoints { got: line.len() })?;
        ordered.push((loc.along, p));
    }
    ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut parts = Vec::with_capacity(ordered.len() + 1);
    let mut rest = line.to_vec();
    for (_, p) in ordered {
        let (head, tail) = match project_and_split(&rest, p, eps) {
            Ok(cut) => cut,
            Err(GeometryError::DegenerateSplit { .. }) => continue,
            Err(e) => return Err(e),
        };
        parts.push(head);
        rest = tail;
    }
    parts.push(rest);
    Ok(parts)
}
