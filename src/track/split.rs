//! Track splitting by index, point, nearest point, shared point and distance.

use log::{debug, info};

use super::Track;
use crate::error::{OptionExt, Result, TrackError};
use crate::geo_utils::DistanceUnit;
use crate::GeoPoint;

/// Where to cut a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitAt {
    /// Cut before this index
    Index(usize),
    /// Cut before the first point exactly equal to this one
    Point(GeoPoint),
}

impl From<usize> for SplitAt {
    fn from(index: usize) -> Self {
        SplitAt::Index(index)
    }
}

impl From<GeoPoint> for SplitAt {
    fn from(point: GeoPoint) -> Self {
        SplitAt::Point(point)
    }
}

impl From<super::NearestPoint> for SplitAt {
    fn from(nearest: super::NearestPoint) -> Self {
        SplitAt::Index(nearest.index)
    }
}

/// Outcome of [`split_at_shared_point`].
#[derive(Debug, Clone, PartialEq)]
pub enum SharedSplit {
    /// The first track was cut; this is its tail
    First(Track),
    /// The second track was cut; this is its tail
    Second(Track),
    /// The shared point is an endpoint of both tracks, nothing to cut
    AlreadyJoined,
}

impl Track {
    /// Cut the track, keep the head in `self` and return the tail.
    ///
    /// The tail starts at the resolved index. With `inclusive`, a copy of the
    /// boundary point is pushed back onto `self` so both halves keep it.
    /// When the target cannot be resolved `self` is left untouched.
    ///
    /// ```
    /// use track_editor::{GeoPoint, Track};
    ///
    /// let mut track = Track::parse("0,0 1,1 2,2").unwrap();
    /// let tail = track.split(GeoPoint::new(1.0, 1.0), true).unwrap();
    /// assert_eq!(track.serialize(), "0,0,0 1,1,0");
    /// assert_eq!(tail.serialize(), "1,1,0 2,2,0");
    /// ```
    pub fn split(&mut self, at: impl Into<SplitAt>, inclusive: bool) -> Result<Track> {
        let index = match at.into() {
            SplitAt::Index(index) if index < self.points.len() => index,
            SplitAt::Index(index) => {
                return Err(TrackError::Lookup {
                    target: format!("index {} of {}-point track", index, self.points.len()),
                })
            }
            SplitAt::Point(point) => self.index_of(&point).ok_or_lookup(format!("point {point}"))?,
        };

        let tail_points = self.points.split_off(index);
        if inclusive {
            self.points.push(tail_points[0]);
        }

        Ok(Track {
            points: tail_points,
            leading_margin: self.leading_margin.clone(),
            trailing_margin: self.trailing_margin.clone(),
        })
    }

    /// Split inclusively at the point nearest to `query`.
    pub fn split_at_nearest(&mut self, query: &GeoPoint) -> Result<Track> {
        let nearest = self
            .nearest_point_to(query)
            .ok_or_lookup(format!("nearest point to {query} in empty track"))?;

        debug!(
            "[Track] Splitting at index {} ({:.3} km from query)",
            nearest.index, nearest.distance
        );
        self.split(nearest, true)
    }

    /// Cut the track into consecutive pieces of roughly `interval` length.
    ///
    /// Distance accumulates without the length correction. A piece closes on
    /// the first point whose accumulated distance exceeds the interval, or on
    /// the last point; the next piece starts on that same point, so pieces
    /// overlap by exactly one point. An empty track yields no pieces.
    pub fn split_by_distance(
        &self,
        interval: f64,
        unit: impl Into<DistanceUnit>,
    ) -> Result<Vec<Track>> {
        if !interval.is_finite() || interval <= 0.0 {
            return Err(TrackError::InvalidInterval { interval });
        }
        let Some(first) = self.points.first() else {
            return Ok(Vec::new());
        };

        let threshold_km = unit.into().to_km(interval);
        let last_index = self.points.len() - 1;
        let mut pieces = Vec::new();
        let mut current = self.empty_like();
        let mut previous = first;
        let mut accumulated = 0.0;

        for (i, point) in self.points.iter().enumerate() {
            current.points.push(*point);
            accumulated += point.distance_to(previous);
            previous = point;

            if accumulated > threshold_km || i == last_index {
                pieces.push(std::mem::replace(&mut current, self.empty_like()));
                current.points.push(*point);
                accumulated = 0.0;
            }
        }

        info!(
            "[Track] Split {} points into {} pieces of {:.3} km",
            self.points.len(),
            pieces.len(),
            threshold_km
        );

        Ok(pieces)
    }

    /// New empty track carrying this track's margins.
    fn empty_like(&self) -> Track {
        Track::new().with_margins(self.leading_margin.as_str(), self.trailing_margin.as_str())
    }
}

/// Split one of two tracks at the single point they share.
///
/// The track holding the shared point strictly inside is cut inclusively,
/// `a` first. If the point is an endpoint of both, they already meet and
/// nothing is cut. Any shared-point count other than one is an error.
pub fn split_at_shared_point(a: &mut Track, b: &mut Track) -> Result<SharedSplit> {
    let shared = a.find_shared_points(b);
    if shared.len() != 1 {
        return Err(TrackError::SharedPointCount {
            count: shared.len(),
        });
    }
    let point = shared[0].point;

    let is_interior = |track: &Track, index: usize| index > 0 && index + 1 < track.len();

    if is_interior(a, shared[0].index) {
        return Ok(SharedSplit::First(a.split(shared[0].index, true)?));
    }

    let index_in_b = b.index_of(&point).ok_or_lookup(format!("point {point}"))?;
    if is_interior(b, index_in_b) {
        return Ok(SharedSplit::Second(b.split(index_in_b, true)?));
    }

    Ok(SharedSplit::AlreadyJoined)
}
