//! `rg-core`: foundational types for the `roadgraph` workspace.
//!
//! This crate is a dependency of every other `rg-*` crate.  It intentionally
//! has no `rg-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`ids`]       | `NodeId`, `EdgeId`, `FeatureId`                            |
//! | [`geo`]       | `Coord` (lon, lat), tolerance equality, haversine distance |
//! | [`feature`]   | `LineFeature`, `Attributes`, `Profile`                     |
//! | [`config`]    | `BuildConfig`, `SearchConfig`, `EngineConfig`              |
//! | [`rng`]       | `SearchRng` (seeded, per query)                            |
//! | [`cancel`]    | `CancelToken`                                              |
//! | [`error`]     | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod cancel;
pub mod config;
pub mod error;
pub mod feature;
pub mod geo;
pub mod ids;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cancel::CancelToken;
pub use config::{BuildConfig, EngineConfig, SearchConfig};
pub use error::{CoreError, CoreResult};
pub use feature::{Attributes, LineFeature, Profile};
pub use geo::Coord;
pub use ids::{EdgeId, FeatureId, NodeId};
pub use rng::SearchRng;
