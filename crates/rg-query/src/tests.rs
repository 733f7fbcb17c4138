//! Unit tests for rg-query.

#[cfg(test)]
mod helpers {
    use rg_core::{Attributes, Coord, EngineConfig, LineFeature};
    use rg_graph::NoopObserver;

    use crate::RouteService;

    pub fn line(points: &[(f64, f64)]) -> LineFeature {
        LineFeature::two_way(points.iter().copied())
    }

    /// A crosses B at (1,0); C overlaps B's upper half.
    pub fn crossing_abc() -> Vec<LineFeature> {
        vec![
            line(&[(0.0, 0.0), (2.0, 0.0)]),
            line(&[(1.0, -1.0), (1.0, 1.0)]),
            line(&[(1.0, 0.0), (1.0, 2.0)]),
        ]
    }

    /// One-way D with cost 5 plus a disconnected two-way E.
    pub fn oneway_and_island() -> Vec<LineFeature> {
        vec![
            LineFeature::new(vec![Coord::new(0.0, 0.0), Coord::new(0.0, 1.0)], Attributes::new(true, 5.0)),
            line(&[(10.0, 10.0), (11.0, 10.0)]),
        ]
    }

    /// Unit square: two equal ways from (0,0) to (1,1).
    pub fn square() -> Vec<LineFeature> {
        vec![
            line(&[(0.0, 0.0), (1.0, 0.0)]),
            line(&[(1.0, 0.0), (1.0, 1.0)]),
            line(&[(0.0, 0.0), (0.0, 1.0)]),
            line(&[(0.0, 1.0), (1.0, 1.0)]),
        ]
    }

    pub fn service_with(features: &[LineFeature]) -> RouteService {
        let service = RouteService::new(EngineConfig::default()).unwrap();
        service.ingest(features, &mut NoopObserver).unwrap();
        service
    }
}

// ── Resolution ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod resolve {
    use rg_core::Coord;
    use rg_graph::Graph;

    use super::helpers::{crossing_abc, service_with};
    use crate::{QueryError, RouteService, Snapshot};

    #[test]
    fn nearest_node() {
        let service = service_with(&crossing_abc());
        let hit = service.resolve(Coord::new(0.9, 0.1)).unwrap();
        assert_eq!(hit.coord, Coord::new(1.0, 0.0));
        assert!(hit.distance_m > 10_000.0 && hit.distance_m < 20_000.0);
    }

    #[test]
    fn exact_position() {
        let service = service_with(&crossing_abc());
        let hit = service.resolve(Coord::new(1.0, 2.0)).unwrap();
        assert_eq!(hit.coord, Coord::new(1.0, 2.0));
        assert_eq!(hit.distance_deg, 0.0);
    }

    #[test]
    fn nothing_published() {
        let service = RouteService::new(Default::default()).unwrap();
        assert!(matches!(service.resolve(Coord::new(0.0, 0.0)), Err(QueryError::NotReady)));
    }

    #[test]
    fn empty_graph_has_no_node() {
        let service = RouteService::new(Default::default()).unwrap();
        service.publish(Snapshot::new(Graph::empty(), 0));
        assert!(matches!(service.resolve(Coord::new(0.0, 0.0)), Err(QueryError::NoNode)));
    }

    #[test]
    fn non_finite_position_is_rejected() {
        let service = service_with(&crossing_abc());
        for pos in [
            Coord::new(f64::NAN, f64::NAN),
            Coord::new(0.0, f64::NAN),
            Coord::new(f64::NEG_INFINITY, 0.0),
        ] {
            assert!(matches!(service.resolve(pos), Err(QueryError::InvalidCoord(_))), "{pos:?}");
        }
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use rg_core::Coord;
    use rg_search::SearchError;

    use super::helpers::{crossing_abc, oneway_and_island, service_with, square};
    use crate::{QueryError, RouteRequest, Strategy};

    #[test]
    fn route_through_shared_crossing() {
        let service = service_with(&crossing_abc());
        let paths = service.route(Coord::new(0.0, 0.0), Coord::new(1.0, 2.0), Strategy::Shortest, 1).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].coords, vec![Coord::new(0.0, 0.0), Coord::new(1.0, 0.0), Coord::new(1.0, 2.0)]);
        assert_eq!(paths[0].cost, 2.0);
        assert_eq!(paths[0].positions()[1], [1.0, 0.0]);
    }

    #[test]
    fn all_strategies_agree_on_the_best_cost() {
        let service = service_with(&crossing_abc());
        for strategy in [Strategy::Shortest, Strategy::AStar, Strategy::KShortest, Strategy::Diverse] {
            let paths = service.route(Coord::new(0.0, 0.0), Coord::new(1.0, -1.0), strategy, 2).unwrap();
            assert_eq!(paths[0].cost, 2.0, "{strategy}");
        }
    }

    #[test]
    fn oneway_is_honoured() {
        let service = service_with(&oneway_and_island());
        let forward = service.route(Coord::new(0.0, 0.0), Coord::new(0.0, 1.0), Strategy::AStar, 1).unwrap();
        assert_eq!(forward[0].cost, 5.0);

        let err = service.route(Coord::new(0.0, 1.0), Coord::new(0.0, 0.0), Strategy::Shortest, 1).unwrap_err();
        assert!(err.is_no_path());
    }

    #[test]
    fn non_finite_endpoint_fails_every_request() {
        let service = service_with(&crossing_abc());
        let bad = Coord::new(f64::NAN, 0.0);
        let err = service.route(Coord::new(0.0, 0.0), bad, Strategy::Shortest, 1).unwrap_err();
        assert!(matches!(err, QueryError::InvalidCoord(_)));

        let results = service
            .route_batch(&[
                RouteRequest::new(bad, Coord::new(1.0, 2.0)),
                RouteRequest::new(Coord::new(0.0, 0.0), Coord::new(1.0, 2.0)),
            ])
            .unwrap();
        assert!(matches!(results[0], Err(QueryError::InvalidCoord(_))));
        assert_eq!(results[1].as_ref().unwrap()[0].cost, 2.0);
    }

    #[test]
    fn disconnected_feature_has_no_path() {
        let service = service_with(&oneway_and_island());
        for strategy in Strategy::ALL {
            let err = service.route(Coord::new(0.0, 0.0), Coord::new(10.0, 10.0), strategy, 2).unwrap_err();
            assert!(err.is_no_path(), "{strategy}: {err}");
        }
    }

    #[test]
    fn k_shortest_alternatives() {
        let service = service_with(&square());
        let paths = service.route(Coord::new(0.0, 0.0), Coord::new(1.0, 1.0), Strategy::KShortest, 3).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.cost == 2.0));
        assert_ne!(paths[0].coords, paths[1].coords);
    }

    #[test]
    fn randomized_returns_k_paths() {
        let service = service_with(&square());
        let paths = service
            .route_request(&RouteRequest::new(Coord::new(0.0, 0.0), Coord::new(1.0, 1.0)).with_strategy(Strategy::Randomized, 4))
            .unwrap();
        assert_eq!(paths.len(), 4);
        assert!(paths.iter().all(|p| p.cost == 2.0 && p.coords.len() == 3));
    }

    #[test]
    fn zero_k_is_rejected() {
        let service = service_with(&square());
        let err = service.route(Coord::new(0.0, 0.0), Coord::new(1.0, 1.0), Strategy::Diverse, 0).unwrap_err();
        assert!(matches!(err, QueryError::Search(SearchError::InvalidK)));
    }

    #[test]
    fn same_point_is_a_trivial_route() {
        let service = service_with(&square());
        let paths = service.route(Coord::new(0.1, 0.0), Coord::new(0.0, 0.1), Strategy::KShortest, 3).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].coords, vec![Coord::new(0.0, 0.0)]);
        assert_eq!(paths[0].cost, 0.0);
    }

    #[test]
    fn batch_keeps_order() {
        let service = service_with(&oneway_and_island());
        let requests = vec![
            RouteRequest::new(Coord::new(0.0, 0.0), Coord::new(0.0, 1.0)),
            RouteRequest::new(Coord::new(0.0, 0.0), Coord::new(11.0, 10.0)),
            RouteRequest::new(Coord::new(10.0, 10.0), Coord::new(11.0, 10.0)),
        ];
        let results = service.route_batch(&requests).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap()[0].cost, 5.0);
        assert!(results[1].as_ref().unwrap_err().is_no_path());
        assert_eq!(results[2].as_ref().unwrap()[0].cost, 1.0);
    }
}

// ── Publishing ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod publishing {
    use std::sync::Arc;

    use rg_core::{BuildConfig, CancelToken, Coord, EngineConfig};
    use rg_graph::{BuildError, CollectingObserver, NoopObserver};

    use super::helpers::{crossing_abc, oneway_and_island, service_with, square};
    use crate::{QueryError, RouteService, Strategy};

    #[test]
    fn old_snapshot_survives_swap() {
        let service = service_with(&crossing_abc());
        let old = service.snapshot().unwrap();
        let new = service.ingest(&oneway_and_island(), &mut NoopObserver).unwrap();

        assert_eq!(old.graph().node_count(), 6);
        assert_eq!(new.graph().node_count(), 4);
        assert!(new.generation() > old.generation());
        assert!(Arc::ptr_eq(&service.snapshot().unwrap(), &new));
    }

    #[test]
    fn failed_build_keeps_serving() {
        let service = service_with(&square());
        let before = service.snapshot().unwrap();
        let err = service.ingest(&[], &mut NoopObserver).err().unwrap();
        assert!(matches!(err, QueryError::Build(BuildError::NoFeatures)));
        assert!(Arc::ptr_eq(&service.snapshot().unwrap(), &before));
    }

    #[test]
    fn cancelled_build_keeps_serving() {
        let service = service_with(&square());
        let before = service.snapshot().unwrap();
        let token = CancelToken::new();
        token.cancel();
        let err = service.build_snapshot(&crossing_abc(), &mut NoopObserver, token).err().unwrap();
        assert!(matches!(err, QueryError::Build(BuildError::Cancelled)));
        assert!(Arc::ptr_eq(&service.snapshot().unwrap(), &before));
    }

    #[test]
    fn build_without_publish() {
        let service = RouteService::new(EngineConfig::default()).unwrap();
        let mut obs = CollectingObserver::new();
        let snapshot = service.build_snapshot(&square(), &mut obs, CancelToken::new()).unwrap();
        assert!(service.snapshot().is_none());
        assert_eq!(obs.stats.unwrap().nodes, snapshot.graph().node_count());
        service.publish(snapshot);
        assert!(service.snapshot().is_some());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EngineConfig { build: BuildConfig::default().with_epsilon(-1.0), ..EngineConfig::default() };
        assert!(matches!(RouteService::new(config), Err(QueryError::Config(_))));
    }

    #[test]
    fn queries_during_republish() {
        let service = service_with(&square());
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..50 {
                        let paths = service
                            .route(Coord::new(0.0, 0.0), Coord::new(1.0, 1.0), Strategy::AStar, 1)
                            .unwrap();
                        assert_eq!(paths[0].cost, 2.0);
                    }
                });
            }
            s.spawn(|| {
                for _ in 0..10 {
                    service.ingest(&square(), &mut NoopObserver).unwrap();
                }
            });
        });
        assert_eq!(service.snapshot().unwrap().generation(), 11);
    }
}
