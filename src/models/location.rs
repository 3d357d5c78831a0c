//! Location model for geographic coordinates and place queries

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DriveWiseError, Result};

/// Location coordinates in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude, -90 to 90
    pub lat: f64,
    /// Longitude, -180 to 180
    pub lon: f64,
}

impl Coordinates {
    /// Create validated coordinates
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(DriveWiseError::validation(format!(
                "latitude {lat} is outside -90..=90"
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(DriveWiseError::validation(format!(
                "longitude {lon} is outside -180..=180"
            )));
        }
        Ok(Self { lat, lon })
    }

    /// Parse a `"lat,lon"` pair. Each half is trimmed; anything other than
    /// exactly two in-range numbers yields `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split(',');
        let lat = parts.next()?.trim().parse::<f64>().ok()?;
        let lon = parts.next()?.trim().parse::<f64>().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Self::new(lat, lon).ok()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// A start or end location as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceQuery {
    /// Looks like a `"lat,lon"` pair and is used without geocoding
    Coordinates(String),
    /// Anything else; resolved through the geocoder
    PlaceName(String),
}

impl PlaceQuery {
    /// Classify a raw query.
    ///
    /// A query counts as coordinates when, after dropping `,` `.` `-` and
    /// spaces, what remains is a non-empty run of ASCII digits. This is a
    /// heuristic: a purely numeric place name such as `"66"` is classified
    /// as coordinates, while `"Route 66"` is a place name.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        let mut remainder = trimmed
            .chars()
            .filter(|c| !matches!(c, ',' | '.' | '-' | ' '))
            .peekable();

        let looks_numeric =
            remainder.peek().is_some() && remainder.all(|c| c.is_ascii_digit());

        if looks_numeric {
            Self::Coordinates(trimmed.to_string())
        } else {
            Self::PlaceName(trimmed.to_string())
        }
    }

    /// The trimmed query text
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Coordinates(raw) | Self::PlaceName(raw) => raw,
        }
    }
}
