//! `rg-graph`: turn raw line features into an immutable, routable graph.
//!
//! # Build pipeline
//!
//! ```text
//! Collecting → Indexed → Splitting → Merging → Finalized
//!   validate     R-tree     cut lines   union-find   CSR graph
//!   + filter     over all   at single   clusters of  with one-way
//!   features     lines      crossings   coordinates  semantics
//! ```
//!
//! Per-feature problems (bad geometry, caps, ambiguous crossings) are
//! reported through a [`BuildObserver`] and never abort the build.  Only an
//! empty input, an unbuildable index, an invalid config or cancellation
//! return a [`BuildError`].
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`graph`]       | `Graph` (CSR adjacency), `GraphAssembler`               |
//! | [`builder`]     | `GraphBuilder`: the five-phase pipeline                |
//! | [`split`]       | per-feature intersection search and cutting             |
//! | [`merge`]       | `DisjointSet`, coordinate clustering                    |
//! | [`diagnostics`] | `Diagnostic`, `BuildStats`, `BuildObserver` + observers |
//! | [`geojson`]     | GeoJSON → `LineFeature` (feature = `"geojson"` only)    |
//! | [`error`]       | `BuildError`, `BuildResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Runs the splitting phase on Rayon's thread pool.         |
//! | `geojson`  | Enables GeoJSON ingestion via the `geojson` crate.       |
//! | `serde`    | Derives `Serialize`/`Deserialize` on core types.         |

pub mod builder;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod merge;
pub mod split;

#[cfg(feature = "geojson")]
pub mod geojson;


pub use builder::GraphBuilder;
pub use diagnostics::{
    BuildObserver, BuildPhase, BuildStats, Cap, CapExceeded, CollectingObserver, Diagnostic,
    LogObserver, NoopObserver,
};
pub use error::{BuildError, BuildResult};
pub use graph::{Graph, GraphAssembler};
