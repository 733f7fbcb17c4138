//! `rg-search`: path search over an immutable [`Graph`](rg_graph::Graph).
//!
//! Every search is read-only with respect to the graph.  Strategies that
//! need different weights (diverse, randomized) work on a private copy, so
//! any number of searches can share one graph across threads.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`router`]       | `Router` trait, `DijkstraRouter`, `AStarRouter`, core search |
//! | [`kshortest`]    | loopless k-shortest paths                                 |
//! | [`alternatives`] | diverse (edge-penalty) and randomized-ensemble paths      |
//! | [`engine`]       | `SearchEngine`, `Strategy`                                |
//! | [`budget`]       | `Budget`: search count, deadline, cancellation           |
//! | [`path`]         | `Path`                                                    |
//! | [`error`]        | `SearchError`, `SearchResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Runs randomized-ensemble trials on Rayon's thread pool. |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.      |

pub mod alternatives;
pub mod budget;
pub mod engine;
pub mod error;
pub mod kshortest;
pub mod path;
pub mod router;


pub use alternatives::{diverse_paths, randomized_paths};
pub use budget::Budget;
pub use engine::{SearchEngine, Strategy};
pub use error::{SearchError, SearchResult};
pub use kshortest::k_shortest_paths;
pub use path::Path;
pub use router::{AStarRouter, Blocked, DijkstraRouter, Heuristic, Router, admissible_scale, shortest_path};
