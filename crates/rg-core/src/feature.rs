//! Ingestion input: line features and their attributes.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::{CoreError, Coord};

/// Edge cost used when a feature carries no `cost` attribute.
pub const DEFAULT_COST: f64 = 1.0;

// ── Attributes ────────────────────────────────────────────────────────────────

/// Attribute map of a [`LineFeature`].
///
/// `oneway`, `cost` and `highway` are lifted out of the raw property bag;
/// every other property is kept verbatim in `tags` (used by [`Profile`]).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub oneway:  bool,
    pub cost:    Option<f64>,
    pub highway: Option<String>,
    pub tags:    BTreeMap<String, String>,
}

impl Attributes {
    pub fn new(oneway: bool, cost: f64) -> Self {
        Self { oneway, cost: Some(cost), ..Self::default() }
    }

    /// Edge weight for every segment of the feature.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost.unwrap_or(DEFAULT_COST)
    }

    pub fn with_highway(mut self, highway: impl Into<String>) -> Self {
        self.highway = Some(highway.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// Interpret a raw `oneway` value.  `yes`, `true` and `1` mean one-way;
/// anything else (including `-1`, which would need reversal) is two-way.
pub fn parse_oneway(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "yes" | "true" | "1")
}

// ── LineFeature ───────────────────────────────────────────────────────────────

/// A digitized road segment: an ordered polyline plus attributes.
///
/// Validity (≥ 2 finite coordinates) is checked by the graph builder, not
/// here, so that invalid input can be reported per feature instead of
/// rejected up front.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineFeature {
    pub coords: Vec<Coord>,
    pub attrs:  Attributes,
}

impl LineFeature {
    pub fn new(coords: Vec<Coord>, attrs: Attributes) -> Self {
        Self { coords, attrs }
    }

    /// Two-way feature with the default cost.
    pub fn two_way(coords: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self::new(coords.into_iter().map(Coord::from).collect(), Attributes::default())
    }

    #[inline]
    pub fn cost(&self) -> f64 {
        self.attrs.cost()
    }

    #[inline]
    pub fn is_oneway(&self) -> bool {
        self.attrs.oneway
    }
}

// ── Profile ───────────────────────────────────────────────────────────────────

/// Travel profile used as a thin pre-filter before graph construction.
///
/// A feature is excluded for a profile when its access tag for that mode is
/// explicitly `no`.  `Any` keeps everything.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Profile {
    #[default]
    Any,
    Car,
    Bike,
    Foot,
}

impl Profile {
    /// The access tag consulted for this profile.
    pub fn access_tag(self) -> Option<&'static str> {
        match self {
            Profile::Any  => None,
            Profile::Car  => Some("motor_vehicle"),
            Profile::Bike => Some("bicycle"),
            Profile::Foot => Some("foot"),
        }
    }

    pub fn allows(self, attrs: &Attributes) -> bool {
        match self.access_tag().and_then(|key| attrs.tag(key)) {
            Some(value) => !value.trim().eq_ignore_ascii_case("no"),
            None => true,
        }
    }
}

impl FromStr for Profile {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any"  => Ok(Profile::Any),
            "car"  => Ok(Profile::Car),
            "bike" => Ok(Profile::Bike),
            "foot" => Ok(Profile::Foot),
            other  => Err(CoreError::Parse(format!("unknown profile `{other}`"))),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Profile::Any  => "any",
            Profile::Car  => "car",
            Profile::Bike => "bike",
            Profile::Foot => "foot",
        };
        f.write_str(name)
    }
}
