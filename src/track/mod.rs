//! # Tracks
//!
//! An ordered sequence of [`GeoPoint`]s plus the whitespace margins of the
//! coordinate text it was parsed from. Point order is the travel direction
//! that length, split and stitch operations reason about.
//!
//! - `codec` - parsing and serializing KML coordinate text
//! - `split` - splitting by index, point, nearest point or distance

mod codec;
mod split;

pub use split::{split_at_shared_point, SharedSplit, SplitAt};

use geo::LineString;
use serde::{Deserialize, Serialize};

use crate::equivalence::{Exact, PointEquivalence};
use crate::geo_utils::{polyline_length, Bounds, DistanceUnit, LENGTH_CORRECTION};
use crate::GeoPoint;

/// Result of a nearest-point search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestPoint {
    /// Position of the point in the track
    pub index: usize,
    pub point: GeoPoint,
    /// Uncorrected great-circle distance to the query, kilometers
    pub distance: f64,
}

/// A point of one track that also occurs in another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SharedPoint {
    pub index: usize,
    pub point: GeoPoint,
}

/// An editable path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    points: Vec<GeoPoint>,
    #[serde(default)]
    leading_margin: String,
    #[serde(default)]
    trailing_margin: String,
}

impl Track {
    /// Create an empty track.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a track from points with empty margins.
    pub fn from_points(points: Vec<GeoPoint>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// Set both margins, as re-emitted by [`Track::serialize`].
    pub fn with_margins(mut self, leading: impl Into<String>, trailing: impl Into<String>) -> Self {
        self.leading_margin = leading.into();
        self.trailing_margin = trailing.into();
        self
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    pub fn leading_margin(&self) -> &str {
        &self.leading_margin
    }

    pub fn trailing_margin(&self) -> &str {
        &self.trailing_margin
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn start_point(&self) -> Option<&GeoPoint> {
        self.points.first()
    }

    pub fn end_point(&self) -> Option<&GeoPoint> {
        self.points.last()
    }

    pub fn push(&mut self, point: GeoPoint) {
        self.points.push(point);
    }

    /// Reverse point order in place. Margins stay where they are.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Append `other`'s points. A boundary point shared by both tracks is
    /// kept twice; callers that want a clean join drop it themselves.
    pub fn concat(&mut self, other: &Track) {
        self.points.extend_from_slice(&other.points);
    }

    /// Track length: haversine legs times [`LENGTH_CORRECTION`], in `unit`.
    ///
    /// # Example
    /// ```
    /// use track_editor::{DistanceUnit, Track};
    ///
    /// let track = Track::parse("0,0 1,1 2,2").unwrap();
    /// let km = track.length(DistanceUnit::Kilometers);
    /// assert!(km > 318.0 && km < 319.0);
    /// ```
    pub fn length(&self, unit: impl Into<DistanceUnit>) -> f64 {
        let km = polyline_length(&self.points) * LENGTH_CORRECTION;
        unit.into().from_km(km)
    }

    /// Closest point to `query`; ties go to the earliest index.
    ///
    /// Returns `None` for an empty track (no index, infinite distance).
    pub fn nearest_point_to(&self, query: &GeoPoint) -> Option<NearestPoint> {
        let mut best: Option<NearestPoint> = None;
        let mut best_distance = f64::INFINITY;

        for (index, point) in self.points.iter().enumerate() {
            let distance = query.distance_to(point);
            if distance < best_distance {
                best_distance = distance;
                best = Some(NearestPoint {
                    index,
                    point: *point,
                    distance,
                });
            }
        }

        best
    }

    /// First index whose point exactly equals `point`.
    pub fn index_of(&self, point: &GeoPoint) -> Option<usize> {
        self.index_of_by(point, &Exact)
    }

    /// First index whose point is the same location as `point` under `policy`.
    pub fn index_of_by<E: PointEquivalence>(&self, point: &GeoPoint, policy: &E) -> Option<usize> {
        self.points
            .iter()
            .position(|p| policy.same_location(p, point))
    }

    /// Every point of `self` that exactly equals some point of `other`, in
    /// `self`'s order.
    pub fn find_shared_points(&self, other: &Track) -> Vec<SharedPoint> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| other.index_of(p).is_some())
            .map(|(index, point)| SharedPoint {
                index,
                point: *point,
            })
            .collect()
    }

    /// Bounding box, `None` when empty.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }

    /// `name` with its length suffix replaced by this track's length in miles.
    pub fn labelled(&self, name: &str) -> String {
        crate::labels::length_label(name, self.length(DistanceUnit::Miles))
    }
}

impl From<Vec<GeoPoint>> for Track {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self::from_points(points)
    }
}

impl FromIterator<GeoPoint> for Track {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self::from_points(iter.into_iter().collect())
    }
}

impl From<&Track> for LineString<f64> {
    fn from(track: &Track) -> Self {
        track.points.iter().map(geo::Coord::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_utils::KM_TO_MILES;
    use approx::assert_relative_eq;

    fn diagonal() -> Track {
        Track::from_points(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(2.0, 2.0),
        ])
    }

    #[test]
    fn test_length_applies_correction_once() {
        let track = diagonal();
        let legs = GeoPoint::new(0.0, 0.0).distance_to(&GeoPoint::new(1.0, 1.0))
            + GeoPoint::new(1.0, 1.0).distance_to(&GeoPoint::new(2.0, 2.0));

        assert_relative_eq!(track.length(false), legs * LENGTH_CORRECTION, max_relative = 1e-12);
        assert_relative_eq!(
            track.length(true),
            legs * LENGTH_CORRECTION * KM_TO_MILES,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_length_of_short_tracks_is_zero() {
        assert_eq!(Track::new().length(DistanceUnit::Kilometers), 0.0);
        let single = Track::from_points(vec![GeoPoint::new(3.0, 4.0)]);
        assert_eq!(single.length(DistanceUnit::Miles), 0.0);
    }

    #[test]
    fn test_length_invariant_to_reverse() {
        let track = diagonal();
        let mut reversed = track.clone();
        reversed.reverse();
        assert_relative_eq!(track.length(false), reversed.length(false), max_relative = 1e-12);
    }

    #[test]
    fn test_reverse_twice_restores() {
        let track = diagonal().with_margins("\n  ", "\n");
        let mut copy = track.clone();
        copy.reverse();
        assert_eq!(copy.start_point(), Some(&GeoPoint::new(2.0, 2.0)));
        assert_eq!(copy.leading_margin(), "\n  ");
        copy.reverse();
        assert_eq!(copy, track);
    }

    #[test]
    fn test_concat_keeps_shared_boundary() {
        let mut a = Track::from_points(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)]);
        let b = Track::from_points(vec![GeoPoint::new(1.0, 1.0), GeoPoint::new(2.0, 2.0)]);
        a.concat(&b);
        assert_eq!(a.len(), 4);
        assert_eq!(a.points()[1], a.points()[2]);
    }

    #[test]
    fn test_nearest_point() {
        let track = diagonal();
        let near = track.nearest_point_to(&GeoPoint::new(0.9, 1.1)).unwrap();
        assert_eq!(near.index, 1);
        assert_eq!(near.point, GeoPoint::new(1.0, 1.0));
        assert!(near.distance > 0.0);
    }

    #[test]
    fn test_nearest_point_tie_takes_earliest() {
        let track = Track::from_points(vec![
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(0.0, -1.0),
            GeoPoint::new(0.0, 1.0),
        ]);
        let near = track.nearest_point_to(&GeoPoint::new(0.0, 0.0)).unwrap();
        assert_eq!(near.index, 0);
    }

    #[test]
    fn test_nearest_point_empty() {
        assert!(Track::new().nearest_point_to(&GeoPoint::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_index_of() {
        let track = diagonal();
        assert_eq!(track.index_of(&GeoPoint::new(1.0, 1.0).with_altitude(12.0)), Some(1));
        assert_eq!(track.index_of(&GeoPoint::new(1.0, 1.5)), None);
        assert_eq!(
            track.index_of_by(
                &GeoPoint::new(1.00001, 1.0),
                &crate::equivalence::WithinDistance::new(0.01)
            ),
            Some(1)
        );
    }

    #[test]
    fn test_find_shared_points() {
        let a = diagonal();
        let b = Track::from_points(vec![
            GeoPoint::new(2.0, 2.0),
            GeoPoint::new(5.0, 5.0),
            GeoPoint::new(0.0, 0.0),
        ]);
        let shared = a.find_shared_points(&b);
        assert_eq!(shared.len(), 2);
        assert_eq!(shared[0].index, 0);
        assert_eq!(shared[1].index, 2);
        assert_eq!(shared[1].point, GeoPoint::new(2.0, 2.0));
    }

    #[test]
    fn test_line_string_conversion() {
        let line: LineString<f64> = (&diagonal()).into();
        assert_eq!(line.0.len(), 3);
        assert_eq!(line.0[1].x, 1.0);
        assert_eq!(diagonal().bounds().unwrap().max_lat, 2.0);
    }
}
