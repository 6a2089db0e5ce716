//! # Track Editor
//!
//! Geometry engine for editing geographic tracks taken from KML documents.
//!
//! This library provides:
//! - Parsing and serializing KML coordinate text, margins preserved
//! - Track length with the Google Earth correction factor
//! - Splitting by index, point, nearest point, shared point or distance
//! - Stitching disjoint fragments into one consistently oriented track
//!
//! Document parsing, rendering and user interaction stay with the caller.
//!
//! ## Features
//!
//! - **`parallel`** - Compute the stitcher's endpoint distance table with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use track_editor::{DistanceUnit, GeoPoint, Stitcher, Track};
//!
//! let north = Track::parse("-122.1,37.5,0 -122.1,37.6,0").unwrap();
//! let south = Track::parse("-122.1,37.4,0 -122.1,37.5,0").unwrap();
//!
//! let stitched = Stitcher::new().stitch(vec![north, south]).unwrap();
//! println!("{:.1} miles", stitched.track.length(DistanceUnit::Miles));
//!
//! let mut track = stitched.track;
//! let tail = track.split_at_nearest(&GeoPoint::new(37.5, -122.1)).unwrap();
//! assert_eq!(track.end_point(), tail.start_point());
//! ```

// Unified error handling
pub mod error;
pub use error::{OptionExt, PointParseError, Result, TopologyFault, TrackError};

// Geographic utilities (distance, units, bounds)
pub mod geo_utils;
pub use geo_utils::{
    Bounds, DistanceUnit, EARTH_MEAN_RADIUS_KM, KM_TO_MILES, LENGTH_CORRECTION,
};

// Point value type
pub mod point;
pub use point::GeoPoint;

// Same-location comparison policies
pub mod equivalence;
pub use equivalence::{Exact, JoinPolicy, PointEquivalence, WithinDistance};

// Editable tracks
pub mod track;
pub use track::{split_at_shared_point, NearestPoint, SharedPoint, SharedSplit, SplitAt, Track};

// Endpoint matching and stitching
pub mod stitch;
pub use stitch::{stitch_tracks, End, StitchConfig, StitchStep, Stitched, Stitcher};

// Placemark name length labels
pub mod labels;

// Algorithm toolbox - flat access to the standalone functions
pub mod algorithms;
