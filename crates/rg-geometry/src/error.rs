//! Geometry error type.

use thiserror::Error;

use rg_core::Coord;

/// Malformed or degenerate geometry.  Always recoverable by the caller: the
/// graph builder drops the feature or leaves it unsplit.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("line has {got} coordinate(s), at least 2 are required")]
    TooFewPoints { got: usize },

    #[error("coordinate {index} is not finite")]
    NonFinite { index: usize },

    #[error("all coordinates of the line coincide")]
    Degenerate,

    #[error("point {point} is {distance:.3e} deg from the line (tolerance {tolerance:.3e})")]
    PointOffLine { point: Coord, distance: f64, tolerance: f64 },

    #[error("cutting at {point} would leave an empty part")]
    DegenerateSplit { point: Coord },
}

pub type GeometryResult<T> = Result<T, GeometryError>;
