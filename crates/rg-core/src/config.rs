//! Build and search configuration.
//!
//! Typically loaded from a JSON file by the application crate (with the
//! `serde` feature) and passed to the builder and route service.  Every
//! field has a default, so a config file only needs the values it changes.

use std::time::Duration;

use crate::{CoreError, CoreResult, Profile};

// ── BuildConfig ───────────────────────────────────────────────────────────────

/// Parameters of one graph-build cycle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuildConfig {
    /// Coordinate tolerance in degrees, applied per axis.  Two coordinates
    /// within `epsilon_deg` on both axes are the same place.  Default 1e-7
    /// (about 1 cm of latitude).
    pub epsilon_deg: f64,

    /// A feature with more line-index candidates than this is left unsplit.
    pub max_candidates: usize,

    /// A feature with more usable intersection points than this is left
    /// unsplit.
    pub max_intersections: usize,

    /// Pre-filter applied while collecting features.
    pub profile: Profile,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            epsilon_deg:       1e-7,
            max_candidates:    256,
            max_intersections: 64,
            profile:           Profile::Any,
        }
    }
}

impl BuildConfig {
    pub fn with_epsilon(mut self, epsilon_deg: f64) -> Self {
        self.epsilon_deg = epsilon_deg;
        self
    }

    pub fn with_caps(mut self, max_candidates: usize, max_intersections: usize) -> Self {
        self.max_candidates = max_candidates;
        self.max_intersections = max_intersections;
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !(self.epsilon_deg.is_finite() && self.epsilon_deg > 0.0) {
            return Err(CoreError::Config(format!(
                "epsilon_deg must be a positive finite number, got {}",
                self.epsilon_deg
            )));
        }
        Ok(())
    }
}

// ── SearchConfig ──────────────────────────────────────────────────────────────

/// Parameters shared by the multi-path search strategies.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Factor applied to the weight of every edge a diverse path uses.
    /// Must be > 1.
    pub diverse_penalty: f64,

    /// Lower bound of the per-edge multiplier in randomized ensembles.
    pub ensemble_min: f64,

    /// Upper bound of the per-edge multiplier in randomized ensembles.
    pub ensemble_max: f64,

    /// Upper bound on spur searches for k-shortest paths.  When reached, the
    /// paths found so far are returned.
    pub max_spur_searches: usize,

    /// Wall-clock budget for one multi-path query, in milliseconds.
    /// `None` means unbounded.
    pub time_budget_ms: Option<u64>,

    /// Seed for randomized ensembles.  The same seed always produces the
    /// same paths on the same graph.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            diverse_penalty:   1.5,
            ensemble_min:      0.9,
            ensemble_max:      1.2,
            max_spur_searches: 10_000,
            time_budget_ms:    None,
            seed:              42,
        }
    }
}

impl SearchConfig {
    #[inline]
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !(self.diverse_penalty.is_finite() && self.diverse_penalty > 1.0) {
            return Err(CoreError::Config(format!(
                "diverse_penalty must be > 1, got {}",
                self.diverse_penalty
            )));
        }
        if !(self.ensemble_min > 0.0
            && self.ensemble_min <= self.ensemble_max
            && self.ensemble_max.is_finite())
        {
            return Err(CoreError::Config(format!(
                "ensemble range must satisfy 0 < min <= max, got [{}, {}]",
                self.ensemble_min, self.ensemble_max
            )));
        }
        Ok(())
    }
}

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Top-level configuration: one build section, one search section.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub build:  BuildConfig,
    pub search: SearchConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> CoreResult<()> {
        self.build.validate()?;
        self.search.validate()
    }
}
