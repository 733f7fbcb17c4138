//! Unit tests for rg-geometry.

#[cfg(test)]
mod helpers {
    use rg_core::Coord;

    pub const EPS: f64 = 1e-9;

    pub fn line(points: &[(f64, f64)]) -> Vec<Coord> {
        points.iter().copied().map(Coord::from).collect()
    }
}

// ── Validation & tolerance ────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use rg_core::Coord;

    use super::helpers::{EPS, line};
    use crate::{GeometryError, coords_equal, validate_line};

    #[test]
    fn too_few_points() {
        let err = validate_line(&line(&[(0.0, 0.0)]), EPS).unwrap_err();
        assert_eq!(err, GeometryError::TooFewPoints { got: 1 });
    }

    #[test]
    fn non_finite_coordinate() {
        let coords = vec![Coord::new(0.0, 0.0), Coord::new(f64::NAN, 1.0)];
        assert_eq!(validate_line(&coords, EPS), Err(GeometryError::NonFinite { index: 1 }));
    }

    #[test]
    fn coincident_points_are_degenerate() {
        let coords = line(&[(1.0, 1.0), (1.0, 1.0 + EPS / 2.0)]);
        assert_eq!(validate_line(&coords, EPS), Err(GeometryError::Degenerate));
    }

    #[test]
    fn ordinary_line_is_valid() {
        assert!(validate_line(&line(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]), EPS).is_ok());
    }

    #[test]
    fn equality_is_per_axis() {
        let a = Coord::new(0.0, 0.0);
        assert!(coords_equal(a, Coord::new(1e-10, -1e-10), EPS));
        assert!(!coords_equal(a, Coord::new(0.0, 2e-9), EPS));
    }
}

// ── Location ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod location {
    use rg_core::Coord;

    use super::helpers::line;
    use crate::locate;

    #[test]
    fn projects_onto_nearest_segment() {
        let l = line(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]);
        let loc = locate(&l, Coord::new(2.5, 1.0)).unwrap();
        assert_eq!(loc.segment, 1);
        assert!((loc.along - 3.0).abs() < 1e-12);
        assert!((loc.distance - 0.5).abs() < 1e-12);
        assert_eq!(loc.projected, Coord::new(2.0, 1.0));
    }

    #[test]
    fn clamps_beyond_end() {
        let l = line(&[(0.0, 0.0), (1.0, 0.0)]);
        let loc = locate(&l, Coord::new(3.0, 0.0)).unwrap();
        assert_eq!(loc.t, 1.0);
        assert_eq!(loc.projected, Coord::new(1.0, 0.0));
    }
}

// ── Intersection ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod intersection {
    use rg_core::Coord;

    use super::helpers::{EPS, line};
    use crate::{Crossing, classify_intersection, intersect};

    #[test]
    fn proper_crossing() {
        let a = line(&[(0.0, 0.0), (2.0, 0.0)]);
        let b = line(&[(1.0, -1.0), (1.0, 1.0)]);
        assert_eq!(intersect(&a, &b, EPS), Some(Coord::new(1.0, 0.0)));
    }

    #[test]
    fn disjoint_lines() {
        let a = line(&[(0.0, 0.0), (1.0, 0.0)]);
        let b = line(&[(0.0, 1.0), (1.0, 1.0)]);
        assert_eq!(classify_intersection(&a, &b, EPS), Crossing::Disjoint);
    }

    #[test]
    fn shared_endpoint_is_a_touch() {
        let a = line(&[(0.0, 0.0), (1.0, 0.0)]);
        let b = line(&[(1.0, 0.0), (1.0, 1.0)]);
        assert_eq!(classify_intersection(&a, &b, EPS), Crossing::Touch);
        assert_eq!(intersect(&a, &b, EPS), None);
    }

    #[test]
    fn collinear_continuation_is_a_touch() {
        let a = line(&[(0.0, 0.0), (1.0, 0.0)]);
        let b = line(&[(1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(classify_intersection(&a, &b, EPS), Crossing::Touch);
    }

    #[test]
    fn t_junction_splits_the_through_line() {
        // b ends on the interior of a.
        let a = line(&[(0.0, 0.0), (2.0, 0.0)]);
        let b = line(&[(1.0, 0.0), (1.0, 2.0)]);
        assert_eq!(intersect(&a, &b, EPS), Some(Coord::new(1.0, 0.0)));
    }

    #[test]
    fn crossing_at_shared_vertex_counts_once() {
        let a = line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let b = line(&[(1.0, -1.0), (1.0, 1.0)]);
        assert_eq!(classify_intersection(&a, &b, EPS), Crossing::Single(Coord::new(1.0, 0.0)));
    }

    #[test]
    fn collinear_overlap_is_unusable() {
        let a = line(&[(1.0, -1.0), (1.0, 1.0)]);
        let b = line(&[(1.0, 0.0), (1.0, 2.0)]);
        assert_eq!(classify_intersection(&a, &b, EPS), Crossing::Overlap);
        assert_eq!(intersect(&a, &b, EPS), None);
    }

    #[test]
    fn double_crossing_is_unusable() {
        let a = line(&[(0.0, 0.0), (3.0, 0.0)]);
        let b = line(&[(1.0, -1.0), (1.0, 1.0), (2.0, 1.0), (2.0, -1.0)]);
        match classify_intersection(&a, &b, EPS) {
            Crossing::Multiple(points) => assert_eq!(points.len(), 2),
            other => panic!("expected Multiple, got {other:?}"),
        }
        assert_eq!(intersect(&a, &b, EPS), None);
    }
}

// ── Splitting ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod splitting {
    use rg_core::Coord;

    use super::helpers::{EPS, line};
    use crate::{GeometryError, project_and_split, split_at_points};

    #[test]
    fn split_inside_segment_inserts_point() {
        let l = line(&[(0.0, 0.0), (2.0, 0.0)]);
        let (head, tail) = project_and_split(&l, Coord::new(1.0, 0.0), EPS).unwrap();
        assert_eq!(head, line(&[(0.0, 0.0), (1.0, 0.0)]));
        assert_eq!(tail, line(&[(1.0, 0.0), (2.0, 0.0)]));
    }

    #[test]
    fn split_at_existing_vertex_reuses_it() {
        let l = line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let (head, tail) = project_and_split(&l, Coord::new(1.0, 0.0), EPS).unwrap();
        assert_eq!(head.len(), 2);
        assert_eq!(tail.len(), 2);
        assert_eq!(head[1], tail[0]);
    }

    #[test]
    fn point_off_line_fails() {
        let l = line(&[(0.0, 0.0), (2.0, 0.0)]);
        let err = project_and_split(&l, Coord::new(1.0, 0.5), EPS).unwrap_err();
        assert!(matches!(err, GeometryError::PointOffLine { .. }));
    }

    #[test]
    fn split_at_endpoint_is_degenerate() {
        let l = line(&[(0.0, 0.0), (2.0, 0.0)]);
        let err = project_and_split(&l, Coord::new(2.0, 0.0), EPS).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateSplit { .. }));
    }

    #[test]
    fn multiple_points_apply_in_projection_order() {
        let l = line(&[(0.0, 0.0), (4.0, 0.0)]);
        // Deliberately out of order, with a duplicate and an endpoint.
        let points = [
            Coord::new(3.0, 0.0),
            Coord::new(1.0, 0.0),
            Coord::new(1.0, 0.0),
            Coord::new(0.0, 0.0),
        ];
        let parts = split_at_points(&l, &points, EPS).unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], line(&[(0.0, 0.0), (1.0, 0.0)]));
        assert_eq!(parts[1], line(&[(1.0, 0.0), (3.0, 0.0)]));
        assert_eq!(parts[2], line(&[(3.0, 0.0), (4.0, 0.0)]));
    }

    #[test]
    fn cuts_snapping_to_one_vertex_apply_once() {
        let l = line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        // Both points are within 1e-3 of the middle vertex but not of each other.
        let points = [Coord::new(1.0008, 0.0), Coord::new(0.9992, 0.0)];
        let parts = split_at_points(&l, &points, 1e-3).unwrap();
        assert_eq!(parts, vec![
            line(&[(0.0, 0.0), (1.0, 0.0)]),
            line(&[(1.0, 0.0), (2.0, 0.0)]),
        ]);
    }

    #[test]
    fn empty_cut_does_not_block_later_cuts() {
        let l = line(&[(0.0, 0.0), (1.0, 0.0), (4.0, 0.0)]);
        let points = [Coord::new(1.0008, 0.0), Coord::new(0.9992, 0.0), Coord::new(3.0, 0.0)];
        let parts = split_at_points(&l, &points, 1e-3).unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1], line(&[(1.0, 0.0), (3.0, 0.0)]));
        assert_eq!(parts[2], line(&[(3.0, 0.0), (4.0, 0.0)]));
    }

    #[test]
    fn no_points_returns_whole_line() {
        let l = line(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(split_at_points(&l, &[], EPS).unwrap(), vec![l.clone()]);
    }
}
