//! Query-time error type.

use thiserror::Error;

use rg_core::{Coord, CoreError};
use rg_graph::BuildError;
use rg_search::SearchError;

#[derive(Debug, Error)]
pub enum QueryError {
    /// The published graph has no nodes to resolve to.
    #[error("graph has no nodes")]
    NoNode,

    /// A query position with a NaN or infinite axis.
    #[error("query coordinate {0:?} is not finite")]
    InvalidCoord(Coord),

    #[error("no graph has been published yet")]
    NotReady,

    #[error("build failed: {0}")]
    Build(#[from] BuildError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Config(#[from] CoreError),
}

impl QueryError {
    /// `true` when the two points are not connected.
    pub fn is_no_path(&self) -> bool {
        matches!(self, QueryError::Search(SearchError::NoPath { .. }))
    }
}

pub type QueryResult<T> = Result<T, QueryError>;
