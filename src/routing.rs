//! Driving routes through the TomTom routing API
//!
//! `RouteService::get_route` only reports a missing route when a start or
//! end place name cannot be geocoded. Every routing API failure is masked
//! with [`RouteResult::mock`].

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::config::DriveWiseConfig;
use crate::geocoding::Geocoder;
use crate::models::route::MOCK_FALLBACK_COORDINATES;
use crate::models::{Coordinates, PlaceQuery, RouteResult, Waypoint, ms_to_kmh};

/// Speed limit assumed for legs without one, in m/s (about 80 km/h)
const DEFAULT_SPEED_LIMIT_MS: f64 = 22.2;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("TomTom API key not configured")]
    MissingCredential,

    #[error("Routing API returned status {0}")]
    Status(u16),

    #[error("Routing response is missing {0}")]
    MissingData(&'static str),

    #[error("Routing request failed: {0}")]
    Request(reqwest::Error),
}

// Request URLs carry API keys in their query strings
impl From<reqwest::Error> for RoutingError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error.without_url())
    }
}

pub struct RouteService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    geocoder: Geocoder,
}

impl RouteService {
    pub fn new(config: &DriveWiseConfig) -> crate::Result<Self> {
        Ok(Self {
            client: crate::http_client(config.tomtom.timeout_seconds)?,
            api_key: config.tomtom.api_key.clone(),
            base_url: config.tomtom.base_url.trim_end_matches('/').to_string(),
            geocoder: Geocoder::new(config)?,
        })
    }

    /// Route between two queries, each either `"lat,lon"` or a place name.
    ///
    /// Returns `None` only if a place name cannot be geocoded.
    #[instrument(skip(self))]
    pub async fn get_route(&self, start: &str, end: &str) -> Option<RouteResult> {
        let start_point = self.resolve_endpoint(start).await?;
        let end_point = self.resolve_endpoint(end).await?;

        match self.fetch_route(&start_point, &end_point).await {
            Ok(route) => Some(route),
            Err(RoutingError::Status(status)) => {
                warn!(status, "Routing API unavailable, using mock route");
                let route = match Coordinates::parse(&start_point) {
                    Some(coords) => RouteResult::mock(coords),
                    None => Self::fallback_route(start),
                };
                Some(route)
            }
            Err(RoutingError::MissingCredential) => {
                debug!("TomTom API key not configured, using mock route");
                Some(Self::fallback_route(start))
            }
            Err(e) => {
                error!("Routing failed, using mock route: {e}");
                Some(Self::fallback_route(start))
            }
        }
    }

    /// Turn a query into the `"lat,lon"` string sent to the routing API
    async fn resolve_endpoint(&self, raw: &str) -> Option<String> {
        match PlaceQuery::classify(raw) {
            PlaceQuery::Coordinates(text) => Some(
                Coordinates::parse(&text)
                    .map(|coords| coords.to_string())
                    .unwrap_or(text),
            ),
            PlaceQuery::PlaceName(name) => {
                info!("Geocoding location: {name}");
                match self.geocoder.resolve(&name).await {
                    Ok(coords) => Some(coords.to_string()),
                    Err(e) => {
                        warn!("Could not geocode location {name}: {e}");
                        None
                    }
                }
            }
        }
    }

    /// Mock route anchored at the caller's original start value when it is
    /// a coordinate pair, otherwise at a fixed default
    fn fallback_route(start: &str) -> RouteResult {
        RouteResult::mock(Coordinates::parse(start).unwrap_or(MOCK_FALLBACK_COORDINATES))
    }

    async fn fetch_route(&self, start: &str, end: &str) -> Result<RouteResult, RoutingError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(RoutingError::MissingCredential)?;

        let url = format!(
            "{}/routing/1/calculateRoute/{}:{}/json",
            self.base_url, start, end
        );
        debug!("Calling the routing API: {url}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", api_key),
                ("traffic", "true"),
                ("routeType", "eco"),
                ("travelMode", "car"),
                ("vehicleEngineType", "combustion"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            debug!(%status, body = %body, "Routing API error response");
            return Err(RoutingError::Status(status.as_u16()));
        }

        let body: CalculateRouteResponse = response.json().await?;
        body.into_route_result()
    }
}

#[derive(Debug, Deserialize)]
struct CalculateRouteResponse {
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    summary: RouteSummary,
    #[serde(default)]
    legs: Vec<RouteLeg>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteSummary {
    length_in_meters: f64,
    travel_time_in_seconds: f64,
    #[serde(default)]
    traffic_delay_in_seconds: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteLeg {
    #[serde(default)]
    points: Vec<RoutePoint>,
    speed_limit_in_meters_per_second: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RoutePoint {
    latitude: f64,
    longitude: f64,
}

impl CalculateRouteResponse {
    fn into_route_result(self) -> Result<RouteResult, RoutingError> {
        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or(RoutingError::MissingData("routes"))?;

        let waypoints = route
            .legs
            .iter()
            .map(|leg| {
                let point = leg
                    .points
                    .first()
                    .ok_or(RoutingError::MissingData("leg points"))?;
                Ok(Waypoint {
                    lat: point.latitude,
                    lon: point.longitude,
                    speed_limit_kmh: ms_to_kmh(
                        leg.speed_limit_in_meters_per_second
                            .unwrap_or(DEFAULT_SPEED_LIMIT_MS),
                    ),
                })
            })
            .collect::<Result<Vec<_>, RoutingError>>()?;

        if waypoints.is_empty() {
            return Err(RoutingError::MissingData("legs"));
        }

        Ok(RouteResult {
            distance_km: route.summary.length_in_meters / 1000.0,
            duration_min: route.summary.travel_time_in_seconds / 60.0,
            waypoints,
            traffic_delay_sec: route.summary.traffic_delay_in_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> Result<RouteResult, RoutingError> {
        serde_json::from_value::<CalculateRouteResponse>(body)
            .unwrap()
            .into_route_result()
    }

    #[test]
    fn test_route_conversion_units() {
        let route = parse(json!({
            "routes": [{
                "summary": {
                    "lengthInMeters": 12500,
                    "travelTimeInSeconds": 900,
                    "trafficDelayInSeconds": 42
                },
                "legs": [
                    {
                        "points": [{"latitude": 52.5, "longitude": 13.4}, {"latitude": 52.6, "longitude": 13.5}],
                        "speedLimitInMetersPerSecond": 25.0
                    },
                    {
                        "points": [{"latitude": 52.6, "longitude": 13.5}]
                    }
                ]
            }]
        }))
        .unwrap();

        assert_eq!(route.distance_km, 12.5);
        assert_eq!(route.duration_min, 15.0);
        assert_eq!(route.traffic_delay_sec, 42);
        assert_eq!(route.waypoints.len(), 2);
        assert_eq!(route.waypoints[0].lat, 52.5);
        assert!((route.waypoints[0].speed_limit_kmh - 90.0).abs() < 1e-9);
        assert!((route.waypoints[1].speed_limit_kmh - 79.92).abs() < 1e-9);
    }

    #[test]
    fn test_route_traffic_delay_defaults_to_zero() {
        let route = parse(json!({
            "routes": [{
                "summary": {"lengthInMeters": 1000, "travelTimeInSeconds": 60},
                "legs": [{"points": [{"latitude": 1.0, "longitude": 2.0}]}]
            }]
        }))
        .unwrap();
        assert_eq!(route.traffic_delay_sec, 0);
    }

    #[test]
    fn test_route_without_routes_or_legs_is_an_error() {
        assert!(matches!(
            parse(json!({"routes": []})),
            Err(RoutingError::MissingData("routes"))
        ));
        assert!(matches!(
            parse(json!({"routes": [{"summary": {"lengthInMeters": 1, "travelTimeInSeconds": 1}, "legs": []}]})),
            Err(RoutingError::MissingData("legs"))
        ));
        assert!(matches!(
            parse(json!({"routes": [{"summary": {"lengthInMeters": 1, "travelTimeInSeconds": 1}, "legs": [{"points": []}]}]})),
            Err(RoutingError::MissingData("leg points"))
        ));
    }

    #[test]
    fn test_fallback_route_uses_original_start() {
        let route = RouteService::fallback_route(" 48.85 , 2.35 ");
        assert_eq!(route.waypoints[0].lat, 48.85);
        assert_eq!(route.waypoints[0].lon, 2.35);

        let route = RouteService::fallback_route("Paris");
        assert_eq!(route.waypoints[0].coordinates(), MOCK_FALLBACK_COORDINATES);
    }

    #[tokio::test]
    async fn test_coordinate_route_without_credential_is_mocked() {
        let service = RouteService::new(&DriveWiseConfig::default()).unwrap();
        let route = service
            .get_route("40.7128,-74.0060", "34.0522,-118.2437")
            .await
            .unwrap();
        assert_eq!(route, RouteResult::mock(MOCK_FALLBACK_COORDINATES));
    }

    #[tokio::test]
    async fn test_missing_credential_is_reported_and_mocked_at_start() {
        let service = RouteService::new(&DriveWiseConfig::default()).unwrap();
        assert!(matches!(
            service.fetch_route("48.85,2.35", "52.52,13.405").await,
            Err(RoutingError::MissingCredential)
        ));

        let route = service.get_route("48.85,2.35", "52.52,13.405").await.unwrap();
        assert_eq!(route, RouteResult::mock(Coordinates::new(48.85, 2.35).unwrap()));
    }

    #[tokio::test]
    async fn test_place_name_without_credential_is_not_found() {
        let service = RouteService::new(&DriveWiseConfig::default()).unwrap();
        assert!(service.get_route("Berlin", "52.52,13.405").await.is_none());
    }
}
