//! Normalized current weather

use serde::{Deserialize, Serialize};

/// Current weather at a point, always fully populated
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherResult {
    /// Temperature in Celsius
    pub temp_c: f64,
    /// Primary condition label, e.g. "Clear" or "Rain"
    pub conditions: String,
    /// Rain volume over the last hour in mm
    pub rain_mm: f64,
    /// Wind speed in km/h
    pub wind_speed_kmh: f64,
}

impl WeatherResult {
    /// Fixed weather used when no weather data can be obtained
    #[must_use]
    pub fn offline_default() -> Self {
        Self {
            temp_c: 20.0,
            conditions: "Clear".to_string(),
            rain_mm: 0.0,
            wind_speed_kmh: 10.0,
        }
    }
}
