//! Geographic utilities: haversine distance, units, bounds.
//!
//! Distances here are in kilometers on a perfect sphere. The whole-track
//! correction towards Google Earth totals lives in [`Track::length`] only.
//!
//! [`Track::length`]: crate::Track::length

use geo::{BoundingRect, LineString};
use serde::{Deserialize, Serialize};

use crate::GeoPoint;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;

/// Empirical factor bringing spherical track lengths in line with Google Earth.
pub const LENGTH_CORRECTION: f64 = 1.01329122253;

/// Kilometers to statute miles.
pub const KM_TO_MILES: f64 = 0.621371;

/// Unit for lengths and split intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
}

impl DistanceUnit {
    /// Convert a kilometer value into this unit.
    pub fn from_km(self, km: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => km,
            DistanceUnit::Miles => km * KM_TO_MILES,
        }
    }

    /// Convert a value in this unit into kilometers.
    pub fn to_km(self, value: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => value,
            DistanceUnit::Miles => value / KM_TO_MILES,
        }
    }
}

impl From<bool> for DistanceUnit {
    /// `true` selects miles, matching the `in_miles` flag of callers.
    fn from(in_miles: bool) -> Self {
        if in_miles {
            DistanceUnit::Miles
        } else {
            DistanceUnit::Kilometers
        }
    }
}

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    // abs() and the grouped cosine product keep the result bit-for-bit symmetric
    let dlat = (lat2 - lat1).abs();
    let dlon = (p2.long - p1.long).abs().to_radians();

    let a = (dlat / 2.0).sin().powi(2) + (dlon / 2.0).sin().powi(2) * (lat1.cos() * lat2.cos());
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_MEAN_RADIUS_KM * c
}

/// Sum of consecutive leg distances in kilometers, uncorrected.
pub fn polyline_length(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| haversine_km(&w[0], &w[1]))
        .sum()
}

/// Bounding box of a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_long: f64,
    pub max_long: f64,
}

impl Bounds {
    /// Compute bounds from points. Returns `None` for an empty slice.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let line: LineString<f64> = points.iter().map(|p| (p.long, p.lat)).collect();
        let rect = line.bounding_rect()?;

        Some(Self {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_long: rect.min().x,
            max_long: rect.max().x,
        })
    }

    /// Center of the box.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_long + self.max_long) / 2.0,
        )
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.long >= self.min_long
            && point.long <= self.max_long
    }
}
