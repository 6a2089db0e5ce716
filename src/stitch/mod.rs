//! # Track Stitching
//!
//! Reassembles disjoint fragments of one route into a single track that
//! runs head-to-tail in a consistent direction.
//!
//! ## Algorithm
//! 1. Collect the start and end of every track
//! 2. Measure every pair of endpoints on different tracks
//! 3. Sort pairs by distance (ties keep enumeration order)
//! 4. Link nearest pairs first, one link per endpoint, until N-1 links exist
//! 5. Require exactly two tracks linked on a single end (the path's ends)
//! 6. Walk from the first end, reversing tracks that face backwards, and
//!    check every joint with the configured [`PointEquivalence`]
//! 7. Concatenate in walk order
//!
//! Pairs are ranked by distance but joints are checked for equivalence, so
//! two fragments whose ends are merely close are linked and then rejected
//! with [`TrackError::Orientation`] under the default exact policy.

mod pairing;
mod walk;

pub use pairing::End;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::equivalence::{JoinPolicy, PointEquivalence};
use crate::error::{Result, TopologyFault, TrackError};
use crate::{GeoPoint, Track};
use pairing::{candidate_pairs, collect_endpoints, link_nearest, StitchNode};
use walk::{find_extremities, walk_path};

/// Configuration for stitching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StitchConfig {
    /// How linked endpoints are compared at each joint.
    /// Default: exact lat/long equality
    #[serde(default)]
    pub join_policy: JoinPolicy,
    /// Drop the duplicated point at each joint.
    /// Default: true
    #[serde(default = "default_merge_joints")]
    pub merge_joints: bool,
}

fn default_merge_joints() -> bool {
    true
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            join_policy: JoinPolicy::Exact,
            merge_joints: true,
        }
    }
}

/// One input track's place in the stitched result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StitchStep {
    /// Position of the track in the input
    pub source_index: usize,
    /// Whether the track was reversed before joining
    pub reversed: bool,
}

/// A stitched track and the order its fragments were joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stitched {
    pub track: Track,
    pub order: Vec<StitchStep>,
}

/// Combines track fragments by matching their endpoints.
///
/// # Example
/// ```
/// use track_editor::{Stitcher, Track};
///
/// let a = Track::parse("0,0 1,1").unwrap();
/// let b = Track::parse("2,2 1,1").unwrap();
///
/// let stitched = Stitcher::new().stitch(vec![a, b]).unwrap();
/// assert_eq!(stitched.track.serialize(), "0,0,0 1,1,0 2,2,0");
/// assert!(stitched.order[1].reversed);
/// ```
#[derive(Debug, Clone)]
pub struct Stitcher<E = JoinPolicy> {
    equivalence: E,
    merge_joints: bool,
}

impl Default for Stitcher<JoinPolicy> {
    fn default() -> Self {
        Self::from_config(&StitchConfig::default())
    }
}

impl Stitcher<JoinPolicy> {
    /// Exact joints, duplicated joint points merged.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &StitchConfig) -> Self {
        Self {
            equivalence: config.join_policy,
            merge_joints: config.merge_joints,
        }
    }
}

impl<E: PointEquivalence> Stitcher<E> {
    /// Use a custom joint comparison.
    pub fn with_equivalence(equivalence: E) -> Self {
        Self {
            equivalence,
            merge_joints: true,
        }
    }

    /// Keep (`false`) or drop (`true`) the duplicated point at each joint.
    pub fn merge_joints(mut self, merge: bool) -> Self {
        self.merge_joints = merge;
        self
    }

    /// Stitch at least two non-empty tracks into one.
    ///
    /// The result takes the margins of the first input track.
    pub fn stitch(&self, mut tracks: Vec<Track>) -> Result<Stitched> {
        if tracks.len() < 2 {
            return Err(TopologyFault::TooFewTracks {
                count: tracks.len(),
            }
            .into());
        }
        info!("[Stitcher] Stitching {} tracks", tracks.len());

        let endpoints = collect_endpoints(&tracks)?;
        let pairs = candidate_pairs(&endpoints);
        let mut nodes = vec![StitchNode::default(); tracks.len()];
        link_nearest(&mut nodes, &pairs)?;

        let (head, _) = find_extremities(&nodes)?;
        let order = walk_path(&mut nodes, head)?;

        let leading = tracks[0].leading_margin().to_string();
        let trailing = tracks[0].trailing_margin().to_string();
        let total_points: usize = tracks.iter().map(Track::len).sum();
        let mut points: Vec<GeoPoint> = Vec::with_capacity(total_points);
        // track index, outgoing point and which of its original ends that is
        let mut previous: Option<(usize, GeoPoint, End)> = None;

        for step in &order {
            let mut track = std::mem::take(&mut tracks[step.source_index]);
            if step.reversed {
                track.reverse();
            }
            let track_points = track.into_points();
            // collect_endpoints rejected empty tracks
            let incoming = track_points[0];
            let outgoing = track_points[track_points.len() - 1];
            let (in_end, out_end) = if step.reversed {
                (End::End, End::Start)
            } else {
                (End::Start, End::End)
            };

            let mut skip = 0;
            if let Some((from_track, from_point, from_end)) = previous {
                if !self.equivalence.same_location(&from_point, &incoming) {
                    return Err(TrackError::Orientation {
                        from_track,
                        from_end,
                        to_track: step.source_index,
                        to_end: in_end,
                        outgoing: from_point,
                        incoming,
                        distance_km: from_point.distance_to(&incoming),
                    });
                }
                if from_point != incoming {
                    warn!(
                        "[Stitcher] Joining track {} to track {} across a {:.6} km gap",
                        from_track,
                        step.source_index,
                        from_point.distance_to(&incoming)
                    );
                }
                if self.merge_joints {
                    skip = 1;
                }
            }

            points.extend(track_points.into_iter().skip(skip));
            previous = Some((step.source_index, outgoing, out_end));
        }

        info!("[Stitcher] Combined track has {} points", points.len());

        Ok(Stitched {
            track: Track::from_points(points).with_margins(leading, trailing),
            order,
        })
    }
}

/// Stitch tracks with the default configuration.
pub fn stitch_tracks(tracks: Vec<Track>) -> Result<Track> {
    Stitcher::new().stitch(tracks).map(|stitched| stitched.track)
}
