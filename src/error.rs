//! Unified error handling for the track-editor library.
//!
//! Parse and lookup failures are recoverable: the caller decides whether to
//! abort or skip. Topology and orientation failures are fatal to the stitch
//! that raised them and carry enough detail (tracks, ends, points) to
//! diagnose the input.

use thiserror::Error;

use crate::stitch::End;
use crate::GeoPoint;

/// Why a single coordinate token could not be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PointParseError {
    /// Fewer than two fields in the token
    #[error("'{token}' has {found} field(s), at least 2 required")]
    TooFewFields { token: String, found: usize },
    /// Longitude or latitude is not a finite number
    #[error("'{token}' has non-numeric {field} '{value}'")]
    NotANumber {
        token: String,
        field: &'static str,
        value: String,
    },
}

/// Why the stitcher could not reduce its endpoint matches to a single path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyFault {
    #[error("at least 2 tracks required, got {count}")]
    TooFewTracks { count: usize },
    #[error("track {track} has no points")]
    EmptyTrack { track: usize },
    #[error("only {paired} of {required} endpoint pairings could be made")]
    PairingExhausted { paired: usize, required: usize },
    /// Tracks linked on exactly one end, with the link count of every track
    #[error("expected 2 path ends, found {} (tracks {:?}); link counts {:?}", .extremities.len(), .extremities, .link_counts)]
    Extremities {
        extremities: Vec<usize>,
        link_counts: Vec<usize>,
    },
    #[error("walk from track {start} reached {visited} of {total} tracks")]
    Disconnected {
        start: usize,
        visited: usize,
        total: usize,
    },
}

/// Unified error type for track-editor operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    /// Malformed coordinate token; `index` is the token's position in the text
    #[error("invalid coordinate at position {index}: {source}")]
    Parse {
        index: usize,
        #[source]
        source: PointParseError,
    },
    /// Split or index target could not be resolved
    #[error("split target not found: {target}")]
    Lookup { target: String },
    /// Two-track split needs exactly one shared point
    #[error("expected exactly 1 shared point, found {count}")]
    SharedPointCount { count: usize },
    /// Split interval must be finite and positive
    #[error("invalid split interval {interval}")]
    InvalidInterval { interval: f64 },
    /// Endpoint matches do not form a single simple path
    #[error("cannot stitch tracks: {0}")]
    Topology(#[from] TopologyFault),
    /// Two linked endpoints are not the same location
    #[error(
        "track {from_track} {from_end} {outgoing} does not meet track {to_track} {to_end} {incoming} ({distance_km:.6} km apart)"
    )]
    Orientation {
        from_track: usize,
        from_end: End,
        to_track: usize,
        to_end: End,
        outgoing: GeoPoint,
        incoming: GeoPoint,
        distance_km: f64,
    },
}

/// Result type alias for track-editor operations.
pub type Result<T> = std::result::Result<T, TrackError>;

/// Extension trait for converting Option to TrackError.
pub trait OptionExt<T> {
    /// Convert Option to Result with a lookup error naming the target.
    fn ok_or_lookup(self, target: impl std::fmt::Display) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_lookup(self, target: impl std::fmt::Display) -> Result<T> {
        self.ok_or_else(|| TrackError::Lookup {
            target: target.to_string(),
        })
    }
}
