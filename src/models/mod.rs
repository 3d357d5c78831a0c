//! Data models for `DriveWise`
//!
//! Plain value records that live for a single request:
//! - Location: coordinates and the coordinate-vs-place-name heuristic
//! - Route: route summary and per-leg waypoints
//! - Weather: normalized current weather
//! - Vehicle: the static vehicle profile
//! - Advice: the driving advice payload and its fallback tiers

pub mod advice;
pub mod location;
pub mod route;
pub mod vehicle;
pub mod weather;

// Re-export all public types for convenient access
pub use advice::AdviceResult;
pub use location::{Coordinates, PlaceQuery};
pub use route::{RouteResult, Waypoint};
pub use vehicle::VehicleProfile;
pub use weather::WeatherResult;

/// Convert a speed in m/s to km/h
#[must_use]
pub fn ms_to_kmh(speed_ms: f64) -> f64 {
    speed_ms * 3.6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ms_to_kmh() {
        assert_eq!(ms_to_kmh(0.0), 0.0);
        assert!((ms_to_kmh(10.0) - 36.0).abs() < 1e-9);
    }
}
