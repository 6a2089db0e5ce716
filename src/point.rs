//! Geographic point value type and its coordinate token formats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PointParseError;
use crate::geo_utils::haversine_km;

/// A latitude/longitude/altitude coordinate.
///
/// Points are small `Copy` values: splitting or joining tracks copies them,
/// so no two tracks ever alias the same point.
///
/// Equality compares latitude and longitude exactly and ignores altitude.
///
/// # Example
/// ```
/// use track_editor::GeoPoint;
///
/// let p = GeoPoint::parse("-122.862637,39.121016,403.89").unwrap();
/// assert_eq!(p.lat, 39.121016);
/// assert_eq!(p.to_string(), "-122.862637,39.121016,403.89");
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Degrees, -90..90
    pub lat: f64,
    /// Degrees, -180..180
    pub long: f64,
    /// Meters
    #[serde(default)]
    pub alt: f64,
}

impl GeoPoint {
    /// Create a point at ground level.
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long, alt: 0.0 }
    }

    /// Copy of this point at a different altitude.
    pub fn with_altitude(self, alt: f64) -> Self {
        Self { alt, ..self }
    }

    /// Parse a KML `coordinates` token: `"long,lat[,alt]"`.
    ///
    /// Altitude falls back to 0 when it is missing or not a number.
    pub fn parse(token: &str) -> Result<Self, PointParseError> {
        let fields: Vec<&str> = token.split(',').collect();
        Self::from_fields(token, &fields)
    }

    /// Parse a KML `gx:coord` token: `"long lat alt"`.
    ///
    /// ```
    /// use track_editor::GeoPoint;
    ///
    /// let p = GeoPoint::parse_track_point(" -122.862637 39.121016 403.89 ").unwrap();
    /// assert_eq!(p.alt, 403.89);
    /// ```
    pub fn parse_track_point(token: &str) -> Result<Self, PointParseError> {
        let fields: Vec<&str> = token.split_whitespace().collect();
        Self::from_fields(token, &fields)
    }

    fn from_fields(token: &str, fields: &[&str]) -> Result<Self, PointParseError> {
        if fields.len() < 2 {
            return Err(PointParseError::TooFewFields {
                token: token.to_string(),
                found: fields.len(),
            });
        }

        let long = parse_coordinate(token, "longitude", fields[0])?;
        let lat = parse_coordinate(token, "latitude", fields[1])?;
        let alt = fields
            .get(2)
            .and_then(|f| f.trim().parse::<f64>().ok())
            .filter(|a| a.is_finite())
            .unwrap_or(0.0);

        Ok(Self { lat, long, alt })
    }

    /// Great-circle distance to `other` in kilometers (haversine, 6371 km sphere).
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        haversine_km(self, other)
    }

    /// Check if the point has finite, in-range coordinates.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.long.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.long)
    }
}

fn parse_coordinate(token: &str, field: &'static str, value: &str) -> Result<f64, PointParseError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PointParseError::NotANumber {
            token: token.to_string(),
            field,
            value: value.to_string(),
        })
}

impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        self.lat == other.lat && self.long == other.long
    }
}

impl fmt::Display for GeoPoint {
    /// `long,lat,alt`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.long, self.lat, self.alt)
    }
}

impl FromStr for GeoPoint {
    type Err = PointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&GeoPoint> for geo::Coord<f64> {
    fn from(p: &GeoPoint) -> Self {
        geo::Coord { x: p.long, y: p.lat }
    }
}
