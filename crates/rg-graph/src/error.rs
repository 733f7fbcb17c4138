//! Build-cycle error type.  Any of these aborts the current cycle only; a
//! previously published graph keeps serving.

use thiserror::Error;

use rg_core::CoreError;
use rg_index::IndexError;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no features to build from")]
    NoFeatures,

    #[error("all {dropped} feature(s) were dropped, nothing to build")]
    NoValidFeatures { dropped: usize },

    #[error("line index construction failed: {0}")]
    Index(#[from] IndexError),

    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("build cancelled")]
    Cancelled,
}

pub type BuildResult<T> = Result<T, BuildError>;
