//! Route model and the mock route used when routing is unavailable

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// Mock distance in kilometers
pub const MOCK_DISTANCE_KM: f64 = 50.0;
/// Mock duration in minutes
pub const MOCK_DURATION_MIN: f64 = 45.0;
/// Mock waypoint speed limit in km/h
pub const MOCK_SPEED_LIMIT_KMH: f64 = 80.0;
/// Mock traffic delay in seconds
pub const MOCK_TRAFFIC_DELAY_SEC: i64 = 300;
/// Waypoint used by the mock route when the start cannot be parsed (New York City)
pub const MOCK_FALLBACK_COORDINATES: Coordinates = Coordinates {
    lat: 40.7128,
    lon: -74.0060,
};

/// A representative point along a route leg
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
    /// Local speed limit in km/h
    pub speed_limit_kmh: f64,
}

impl Waypoint {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

/// Driving route summary
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RouteResult {
    pub distance_km: f64,
    pub duration_min: f64,
    /// One waypoint per route leg, never empty
    pub waypoints: Vec<Waypoint>,
    pub traffic_delay_sec: i64,
}

impl RouteResult {
    /// The fixed route returned when the routing API cannot be used,
    /// with its single waypoint at `start`.
    #[must_use]
    pub fn mock(start: Coordinates) -> Self {
        Self {
            distance_km: MOCK_DISTANCE_KM,
            duration_min: MOCK_DURATION_MIN,
            waypoints: vec![Waypoint {
                lat: start.lat,
                lon: start.lon,
                speed_limit_kmh: MOCK_SPEED_LIMIT_KMH,
            }],
            traffic_delay_sec: MOCK_TRAFFIC_DELAY_SEC,
        }
    }

    #[must_use]
    pub fn first_waypoint(&self) -> Option<&Waypoint> {
        self.waypoints.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_route_values() {
        let start = Coordinates::new(52.52, 13.405).unwrap();
        let route = RouteResult::mock(start);

        assert_eq!(route.distance_km, 50.0);
        assert_eq!(route.duration_min, 45.0);
        assert_eq!(route.traffic_delay_sec, 300);
        assert_eq!(
            route.waypoints,
            vec![Waypoint {
                lat: 52.52,
                lon: 13.405,
                speed_limit_kmh: 80.0
            }]
        );
    }

    #[test]
    fn test_route_serialization_field_names() {
        let route = RouteResult::mock(MOCK_FALLBACK_COORDINATES);
        let json = serde_json::to_value(&route).unwrap();

        assert_eq!(json["distance_km"], 50.0);
        assert_eq!(json["waypoints"][0]["lat"], 40.7128);
        assert_eq!(json["waypoints"][0]["lon"], -74.006);
        assert_eq!(json["waypoints"][0]["speed_limit_kmh"], 80.0);
        assert_eq!(json["traffic_delay_sec"], 300);
    }
}
