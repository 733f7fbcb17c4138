//! `rg-geometry`: planar polyline utilities with a coordinate tolerance.
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`line`]      | `coords_equal`, `validate_line`, `locate`, `line_length`  |
//! | [`intersect`] | `intersect`, `classify_intersection`, `Crossing`          |
//! | [`split`]     | `project_and_split`, `split_at_points`                    |
//! | [`error`]     | `GeometryError`, `GeometryResult<T>`                      |
//!
//! All computations treat `(lon, lat)` as planar coordinates in degrees.
//! The tolerance `eps` is a per-axis box in degrees; it is an approximation
//! valid only for small values in a locally flat neighbourhood.

pub mod error;
pub mod intersect;
pub mod line;
pub mod split;

#[cfg(test)]
mod tests;

pub use error::{GeometryError, GeometryResult};
pub use intersect::{Crossing, classify_intersection, intersect};
pub use line::{Location, coords_equal, line_length, locate, validate_line};
pub use split::{project_and_split, split_at_points};
