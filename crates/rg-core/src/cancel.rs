//! Cooperative cancellation for long builds and multi-path queries.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cheaply clonable flag shared between the caller and a running job.
///
/// Jobs poll [`is_cancelled`](Self::is_cancelled) between units of work
/// (features, phases, candidate searches) and unwind without publishing
/// anything.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
