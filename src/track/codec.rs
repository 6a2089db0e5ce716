//! KML coordinate text codec.

use std::fmt;

use log::debug;

use super::Track;
use crate::error::{Result, TrackError};
use crate::GeoPoint;

impl Track {
    /// Parse a KML `<coordinates>` body: whitespace-separated `long,lat[,alt]`
    /// tokens. Leading and trailing whitespace is kept as the track's margins.
    ///
    /// Any malformed token fails the whole parse; the error carries the token
    /// and its position.
    ///
    /// ```
    /// use track_editor::Track;
    ///
    /// let text = "\n  1,2,0 3,4,0\n";
    /// let track = Track::parse(text).unwrap();
    /// assert_eq!(track.len(), 2);
    /// assert_eq!(track.serialize(), text);
    /// ```
    pub fn parse(coord_text: &str) -> Result<Self> {
        let body = coord_text.trim_start();
        let leading = &coord_text[..coord_text.len() - body.len()];
        let body = body.trim_end();
        let trailing = &coord_text[leading.len() + body.len()..];

        let points = body
            .split_whitespace()
            .enumerate()
            .map(|(index, token)| {
                GeoPoint::parse(token).map_err(|source| TrackError::Parse { index, source })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("[Track] Parsed {} coordinates", points.len());

        Ok(Track::from_points(points).with_margins(leading, trailing))
    }

    /// Parse `gx:coord` style text: one `long lat alt` point per line.
    ///
    /// Blank lines are skipped. Margins are left empty, so the result
    /// serializes as a plain `<coordinates>` body.
    pub fn parse_track_points(text: &str) -> Result<Self> {
        let points = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(index, line)| {
                GeoPoint::parse_track_point(line)
                    .map_err(|source| TrackError::Parse { index, source })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Track::from_points(points))
    }

    /// Coordinate text: margin, points joined by single spaces, margin.
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.leading_margin)?;
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{point}")?;
        }
        f.write_str(&self.trailing_margin)
    }
}
