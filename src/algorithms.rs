//! # Algorithm Toolbox
//!
//! Flat access to the standalone pieces of the engine for callers that
//! work on point slices rather than [`Track`]s.
//!
//! ## Geographic Utilities
//!
//! - **Haversine Distance**: great-circle distance on a 6371 km sphere
//! - **Polyline Length**: uncorrected total distance along a path
//! - **Bounds**: bounding box for a set of points
//!
//! # Example
//!
//! ```rust
//! use track_editor::algorithms::{haversine_km, GeoPoint};
//!
//! let london = GeoPoint::new(51.5074, -0.1278);
//! let paris = GeoPoint::new(48.8566, 2.3522);
//! println!("London to Paris: {:.0} km", haversine_km(&london, &paris));
//! ```

// =============================================================================
// Core Types (re-exported from lib)
// =============================================================================

pub use crate::{Bounds, DistanceUnit, GeoPoint, NearestPoint, StitchConfig, Track};

// =============================================================================
// Geographic Utilities
// =============================================================================

pub use crate::geo_utils::{haversine_km, polyline_length};

// =============================================================================
// Splitting and Stitching
// =============================================================================

/// Split one of two tracks at their single shared point.
pub use crate::track::split_at_shared_point;

/// Combine fragments with the default configuration.
pub use crate::stitch::stitch_tracks;

/// Length suffix for placemark names.
pub use crate::labels::length_label;

/// Corrected length of a point slice, as [`Track::length`] computes it.
///
/// # Example
/// ```rust
/// use track_editor::algorithms::{corrected_length, DistanceUnit, GeoPoint};
///
/// let points = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)];
/// let miles = corrected_length(&points, DistanceUnit::Miles);
/// assert!(miles > 69.0 && miles < 71.0);
/// ```
pub fn corrected_length(points: &[GeoPoint], unit: DistanceUnit) -> f64 {
    unit.from_km(polyline_length(points) * crate::LENGTH_CORRECTION)
}

/// Index of the point nearest to `query`, earliest on ties.
pub fn nearest_index(points: &[GeoPoint], query: &GeoPoint) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, query.distance_to(p)))
        .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ if d.is_nan() => best,
            _ => Some((i, d)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrected_length_matches_track() {
        let track = Track::parse("0,0 1,1 2,2").unwrap();
        assert_eq!(
            corrected_length(track.points(), DistanceUnit::Kilometers),
            track.length(DistanceUnit::Kilometers)
        );
    }

    #[test]
    fn test_nearest_index_matches_track() {
        let track = Track::parse("0,0 1,1 2,2 1,1").unwrap();
        let query = GeoPoint::new(1.1, 0.9);
        assert_eq!(
            nearest_index(track.points(), &query),
            track.nearest_point_to(&query).map(|n| n.index)
        );
        assert_eq!(nearest_index(&[], &query), None);
    }
}
