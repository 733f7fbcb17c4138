//! Index construction errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndexError {
    #[error("cannot build a {0} index from zero geometries")]
    Empty(&'static str),

    #[error("geometry {slot} has a non-finite bounding box")]
    NonFiniteEnvelope { slot: usize },
}

pub type IndexResult<T> = Result<T, IndexError>;
