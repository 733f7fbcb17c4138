//! `rg-index`: static spatial indices.
//!
//! | Module    | Contents                                                     |
//! |-----------|--------------------------------------------------------------|
//! | [`line`]  | `LineIndex`: candidate-intersection queries between lines    |
//! | [`point`] | `PointIndex`: nearest-node queries                           |
//! | [`error`] | `IndexError`, `IndexResult<T>`                               |
//!
//! Both indices are bulk-loaded once and never mutated afterwards, so a
//! built index is `Send + Sync` and can be shared by concurrent readers.

pub mod error;
pub mod line;
pub mod point;


pub use error::{IndexError, IndexResult};
pub use line::LineIndex;
pub use point::{Nearest, PointIndex};
