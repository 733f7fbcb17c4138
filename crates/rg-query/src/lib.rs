//! `rg-query`: the façade callers use: publish graphs, resolve points,
//! ask for routes.
//!
//! ```text
//! features ──► RouteService::ingest ──► Arc<Snapshot> (graph + point index)
//!                                             │
//! (lon, lat) × 2 + Strategy + k ──► route ────┴──► Vec<RoutePath>
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                       |
//! |--------------|------------------------------------------------|
//! | [`service`]  | `RouteService`                                 |
//! | [`snapshot`] | `Snapshot`                                     |
//! | [`request`]  | `RouteRequest`, `RoutePath`                    |
//! | [`error`]    | `QueryError`, `QueryResult<T>`                 |

pub mod error;
pub mod request;
pub mod service;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use error::{QueryError, QueryResult};
pub use request::{RoutePath, RouteRequest};
pub use service::RouteService;
pub use snapshot::Snapshot;

pub use rg_search::Strategy;
