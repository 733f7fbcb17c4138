//! Search error type.

use thiserror::Error;

use rg_core::{CoreError, NodeId};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("k must be at least 1")]
    InvalidK,

    #[error("search cancelled")]
    Cancelled,

    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type SearchResult<T> = Result<T, SearchError>;
