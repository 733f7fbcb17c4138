//! Unit tests for rg-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CoreError, EdgeId, FeatureId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId::from_index(42).unwrap();
        assert_eq!(id, NodeId(42));
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert!(!FeatureId::INVALID.is_valid());
        assert!(FeatureId(0).is_valid());
    }

    #[test]
    fn from_index_rejects_sentinel_and_overflow() {
        let last = u32::MAX as usize - 1;
        assert_eq!(EdgeId::from_index(last).unwrap(), EdgeId(u32::MAX - 1));
        assert_eq!(
            EdgeId::from_index(u32::MAX as usize),
            Err(CoreError::IdOverflow { kind: "edge", index: u32::MAX as usize }),
        );
        #[cfg(target_pointer_width = "64")]
        assert!(NodeId::from_index(u32::MAX as usize + 1).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(FeatureId(7).to_string(), "FeatureId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Coord;

    #[test]
    fn lon_lat_order_from_tuple() {
        let c = Coord::from((73.05, 33.6));
        assert_eq!(c.lon, 73.05);
        assert_eq!(c.lat, 33.6);
    }

    #[test]
    fn approx_eq_is_per_axis() {
        let a = Coord::new(1.0, 1.0);
        assert!(a.approx_eq(Coord::new(1.0 + 1e-8, 1.0 - 1e-8), 1e-7));
        assert!(!a.approx_eq(Coord::new(1.0 + 2e-7, 1.0), 1e-7));
        // The bound is inclusive, and the diagonal corner of the box counts.
        let o = Coord::new(0.0, 0.0);
        assert!(o.approx_eq(Coord::new(0.5, 0.5), 0.5));
        assert!(o.approx_eq(Coord::new(-0.5, 0.25), 0.5));
        assert!(!o.approx_eq(Coord::new(0.5, 0.625), 0.5));
    }

    #[test]
    fn one_degree_latitude() {
        let a = Coord::new(73.0, 33.0);
        let b = Coord::new(73.0, 34.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 200.0, "got {d}");
    }

    #[test]
    fn zero_distance() {
        let p = Coord::new(73.04934, 33.59675);
        assert!(p.distance_m(p) < 1e-6);
    }
}

#[cfg(test)]
mod feature {
    use crate::feature::parse_oneway;
    use crate::{Attributes, LineFeature, Profile};

    #[test]
    fn cost_defaults_to_one() {
        let f = LineFeature::two_way([(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(f.cost(), 1.0);
        assert!(!f.is_oneway());
    }

    #[test]
    fn oneway_strings() {
        assert!(parse_oneway("yes"));
        assert!(parse_oneway("True"));
        assert!(parse_oneway("1"));
        assert!(!parse_oneway("no"));
        assert!(!parse_oneway("-1"));
    }

    #[test]
    fn profile_filters_on_access_tag() {
        let no_cars = Attributes::default().with_tag("motor_vehicle", "no");
        assert!(!Profile::Car.allows(&no_cars));
        assert!(Profile::Bike.allows(&no_cars));
        assert!(Profile::Any.allows(&no_cars));

        let footway = Attributes::default().with_tag("foot", "yes");
        assert!(Profile::Foot.allows(&footway));
    }

    #[test]
    fn profile_parse() {
        assert_eq!("Car".parse::<Profile>().unwrap(), Profile::Car);
        assert!("boat".parse::<Profile>().is_err());
    }
}

#[cfg(test)]
mod config {
    use crate::{BuildConfig, EngineConfig, SearchConfig};

    #[test]
    fn defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn epsilon_must_be_positive() {
        assert!(BuildConfig::default().with_epsilon(0.0).validate().is_err());
        assert!(BuildConfig::default().with_epsilon(f64::NAN).validate().is_err());
    }

    #[test]
    fn penalty_must_exceed_one() {
        let cfg = SearchConfig { diverse_penalty: 1.0, ..SearchConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn ensemble_range_ordered() {
        let cfg = SearchConfig { ensemble_min: 1.3, ensemble_max: 1.2, ..SearchConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::SearchRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SearchRng::new(7);
        let mut b = SearchRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.factor(0.9, 1.2), b.factor(0.9, 1.2));
        }
    }

    #[test]
    fn factor_within_range() {
        let mut r = SearchRng::new(1);
        for _ in 0..1_000 {
            let f = r.factor(0.9, 1.2);
            assert!((0.9..=1.2).contains(&f));
        }
        assert_eq!(r.factor(1.0, 1.0), 1.0);
    }
}

#[cfg(test)]
mod cancel {
    use crate::CancelToken;

    #[test]
    fn clones_share_state() {
        let token = CancelToken::new();
        let seen_by_worker = token.clone();
        assert!(!seen_by_worker.is_cancelled());
        token.cancel();
        assert!(seen_by_worker.is_cancelled());
    }
}
