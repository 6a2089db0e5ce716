//! Comparison policies for deciding whether two points are the same location.
//!
//! Shared-endpoint detection and stitch joins default to exact lat/long
//! equality. A tolerance can be swapped in through [`PointEquivalence`]
//! without changing the default behavior of existing callers.

use serde::{Deserialize, Serialize};

use crate::GeoPoint;

/// Decides whether two points denote the same location.
pub trait PointEquivalence {
    fn same_location(&self, a: &GeoPoint, b: &GeoPoint) -> bool;
}

/// Exact latitude and longitude equality (altitude ignored).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exact;

impl PointEquivalence for Exact {
    fn same_location(&self, a: &GeoPoint, b: &GeoPoint) -> bool {
        a == b
    }
}

/// Points within `tolerance_km` great-circle distance are the same location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WithinDistance {
    pub tolerance_km: f64,
}

impl WithinDistance {
    pub fn new(tolerance_km: f64) -> Self {
        Self { tolerance_km }
    }
}

impl PointEquivalence for WithinDistance {
    fn same_location(&self, a: &GeoPoint, b: &GeoPoint) -> bool {
        a == b || a.distance_to(b) <= self.tolerance_km
    }
}

/// Serializable join policy for configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JoinPolicy {
    #[default]
    Exact,
    Within { tolerance_km: f64 },
}

impl PointEquivalence for JoinPolicy {
    fn same_location(&self, a: &GeoPoint, b: &GeoPoint) -> bool {
        match *self {
            JoinPolicy::Exact => Exact.same_location(a, b),
            JoinPolicy::Within { tolerance_km } => {
                WithinDistance::new(tolerance_km).same_location(a, b)
            }
        }
    }
}

impl<E: PointEquivalence + ?Sized> PointEquivalence for &E {
    fn same_location(&self, a: &GeoPoint, b: &GeoPoint) -> bool {
        (**self).same_location(a, b)
    }
}
