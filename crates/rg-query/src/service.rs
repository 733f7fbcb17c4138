//! `RouteService`: builds, publishes and queries graph snapshots.
//!
//! # Publishing
//!
//! Builds always produce a fresh [`Snapshot`] outside any lock; publishing
//! swaps one `Arc` under a short write lock.  A query clones the current
//! `Arc` once and runs entirely on it, so a concurrent rebuild or publish
//! never changes the graph under an in-flight search.  A failed or
//! cancelled build leaves the published snapshot in place.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use rg_core::{CancelToken, Coord, EngineConfig, LineFeature};
use rg_graph::{BuildObserver, GraphBuilder};
use rg_index::Nearest;
use rg_search::{SearchEngine, Strategy};

use crate::{QueryError, QueryResult, RoutePath, RouteRequest, Snapshot};

pub struct RouteService {
    config:     EngineConfig,
    current:    RwLock<Option<Arc<Snapshot>>>,
    generation: AtomicU64,
}

impl RouteService {
    /// Fails if `config` is invalid.
    pub fn new(config: EngineConfig) -> QueryResult<Self> {
        config.validate()?;
        Ok(Self { config, current: RwLock::new(None), generation: AtomicU64::new(0) })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ── Building & publishing ─────────────────────────────────────────────

    /// Build a snapshot without publishing it.
    pub fn build_snapshot<O>(
        &self,
        features: &[LineFeature],
        observer: &mut O,
        cancel:   CancelToken,
    ) -> QueryResult<Snapshot>
    where
        O: BuildObserver + ?Sized,
    {
        let graph = GraphBuilder::new(self.config.build.clone())
            .with_cancel(cancel)
            .build(features, observer)?;
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(Snapshot::new(graph, generation))
    }

    /// Make `snapshot` the one queries see.  Returns the shared handle.
    pub fn publish(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(old) = current.as_ref() {
            log::debug!("replacing snapshot {} with {}", old.generation(), snapshot.generation());
        }
        *current = Some(Arc::clone(&snapshot));
        log::info!(
            "published snapshot {}: {} nodes, {} edges",
            snapshot.generation(),
            snapshot.graph().node_count(),
            snapshot.graph().edge_count(),
        );
        snapshot
    }

    /// Build and publish in one step.
    pub fn ingest<O>(&self, features: &[LineFeature], observer: &mut O) -> QueryResult<Arc<Snapshot>>
    where
        O: BuildObserver + ?Sized,
    {
        let snapshot = self.build_snapshot(features, observer, CancelToken::new())?;
        Ok(self.publish(snapshot))
    }

    /// The published snapshot, if any.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn require_snapshot(&self) -> QueryResult<Arc<Snapshot>> {
        self.snapshot().ok_or(QueryError::NotReady)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Nearest node of the published graph.
    pub fn resolve(&self, pos: Coord) -> QueryResult<Nearest> {
        self.require_snapshot()?.resolve(pos)
    }

    /// Resolve both points and run `strategy`.
    pub fn route(
        &self,
        source:   Coord,
        target:   Coord,
        strategy: Strategy,
        k:        usize,
    ) -> QueryResult<Vec<RoutePath>> {
        self.route_cancellable(source, target, strategy, k, CancelToken::new())
    }

    pub fn route_cancellable(
        &self,
        source:   Coord,
        target:   Coord,
        strategy: Strategy,
        k:        usize,
        cancel:   CancelToken,
    ) -> QueryResult<Vec<RoutePath>> {
        let snapshot = self.require_snapshot()?;
        route_on(&snapshot, &self.config, source, target, strategy, k, cancel)
    }

    pub fn route_request(&self, request: &RouteRequest) -> QueryResult<Vec<RoutePath>> {
        self.route(request.source, request.target, request.strategy, request.k)
    }

    /// Answer independent requests against one snapshot, in input order.
    /// Runs on Rayon's thread pool with the `parallel` feature.
    pub fn route_batch(&self, requests: &[RouteRequest]) -> QueryResult<Vec<QueryResult<Vec<RoutePath>>>> {
        let snapshot = self.require_snapshot()?;
        let run = |r: &RouteRequest| {
            route_on(&snapshot, &self.config, r.source, r.target, r.strategy, r.k, CancelToken::new())
        };

        #[cfg(feature = "parallel")]
        let results = {
            use rayon::prelude::*;
            requests.par_iter().map(run).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let results = requests.iter().map(run).collect();

        Ok(results)
    }
}

fn route_on(
    snapshot: &Snapshot,
    config:   &EngineConfig,
    source:   Coord,
    target:   Coord,
    strategy: Strategy,
    k:        usize,
    cancel:   CancelToken,
) -> QueryResult<Vec<RoutePath>> {
    let from = snapshot.resolve(source)?;
    let to = snapshot.resolve(target)?;
    log::debug!(
        "route {strategy}: {source} → {} ({:.1} m), {target} → {} ({:.1} m)",
        from.node,
        from.distance_m,
        to.node,
        to.distance_m,
    );

    let graph = snapshot.graph();
    let paths = SearchEngine::with_scale(graph, config.search.clone(), snapshot.scale())
        .with_cancel(cancel)
        .run(strategy, from.node, to.node, k)?;
    Ok(paths.iter().map(|p| RoutePath::from_path(graph, p)).collect())
}
