//! Bounds on multi-path searches: a search count, a wall-clock deadline and
//! a cancellation token.

use std::time::Instant;

use rg_core::{CancelToken, SearchConfig};

use crate::{SearchError, SearchResult};

#[derive(Clone, Debug)]
pub struct Budget {
    max_searches: usize,
    deadline:     Option<Instant>,
    cancel:       CancelToken,
    used:         usize,
}

impl Budget {
    /// Budget starting now.
    pub fn new(config: &SearchConfig, cancel: CancelToken) -> Self {
        Self {
            max_searches: config.max_spur_searches,
            deadline:     config.time_budget().map(|d| Instant::now() + d),
            cancel,
            used:         0,
        }
    }

    pub fn unlimited() -> Self {
        Self { max_searches: usize::MAX, deadline: None, cancel: CancelToken::new(), used: 0 }
    }

    /// Account for one more search.
    ///
    /// `Ok(false)` when the count or time limit is reached (callers stop and
    /// return what they have); `Err(Cancelled)` when the token fired.
    pub fn spend(&mut self) -> SearchResult<bool> {
        if self.cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }
        if self.used >= self.max_searches {
            return Ok(false);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Ok(false);
        }
        self.used += 1;
        Ok(true)
    }

    pub fn used(&self) -> usize {
        self.used
    }
}
