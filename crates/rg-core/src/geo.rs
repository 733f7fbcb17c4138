//! Geographic coordinate type and distance helpers.
//!
//! `Coord` keeps GeoJSON axis order: **longitude first, latitude second**,
//! both in decimal degrees (`f64`).  Everything that compares coordinates
//! within a tolerance works in planar degrees per axis; only
//! [`Coord::distance_m`] is a true great-circle measure.

use std::fmt;

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A WGS-84 coordinate in `(longitude, latitude)` order.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

impl Coord {
    #[inline]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// `true` when both axes are within `eps` degrees of `other`.
    ///
    /// This is a per-axis box test, not a distance: it is only meaningful
    /// for small `eps` where the surface is locally flat.
    #[inline]
    pub fn approx_eq(self, other: Coord, eps: f64) -> bool {
        (self.lon - other.lon).abs() <= eps && (self.lat - other.lat).abs() <= eps
    }

    /// Planar Euclidean distance in degrees.
    #[inline]
    pub fn planar_distance(self, other: Coord) -> f64 {
        (self.lon - other.lon).hypot(self.lat - other.lat)
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: Coord) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// `[lon, lat]`, the layout used by the R-tree indices.
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl From<(f64, f64)> for Coord {
    #[inline]
    fn from((lon, lat): (f64, f64)) -> Self {
        Coord::new(lon, lat)
    }
}

impl From<[f64; 2]> for Coord {
    #[inline]
    fn from([lon, lat]: [f64; 2]) -> Self {
        Coord::new(lon, lat)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.7}, {:.7})", self.lon, self.lat)
    }
}
