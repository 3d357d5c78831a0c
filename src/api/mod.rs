use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    VERSION,
    advice::{AdviceContext, AdviceGenerator},
    config::DriveWiseConfig,
    models::{AdviceResult, Coordinates, RouteResult, VehicleProfile, WeatherResult},
    routing::RouteService,
    weather::WeatherProvider,
};

pub mod error;

pub use error::ApiError;

/// Components shared by all handlers; built once at startup
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteService>,
    pub weather: Arc<WeatherProvider>,
    pub advice: Arc<AdviceGenerator>,
    pub vehicle: Arc<VehicleProfile>,
}

impl AppState {
    pub fn from_config(config: &DriveWiseConfig) -> crate::Result<Self> {
        Ok(Self {
            routes: Arc::new(RouteService::new(config)?),
            weather: Arc::new(WeatherProvider::new(config)?),
            advice: Arc::new(AdviceGenerator::new(config)?),
            vehicle: Arc::new(config.vehicle.clone()),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRouteRequest {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeRouteResponse {
    pub route: RouteResult,
    pub weather: WeatherResult,
    pub suggestions: AdviceResult,
}

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CurrentWeatherResponse {
    pub weather: WeatherResult,
    pub city: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/analyze_route",
            post(analyze_route).get(analyze_route_not_allowed),
        )
        .route("/current_weather", get(current_weather))
        .route("/health", get(health))
        .with_state(state)
}

async fn analyze_route(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRouteRequest>, JsonRejection>,
) -> Result<Json<AnalyzeRouteResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!("Rejected analyze_route body: {rejection}");
        ApiError::bad_request("Missing start or end coordinates")
    })?;

    info!("Analyzing route from {} to {}", request.start, request.end);

    let route = state
        .routes
        .get_route(&request.start, &request.end)
        .await
        .ok_or_else(|| ApiError::not_found("Route not found"))?;

    let waypoint = route
        .first_waypoint()
        .ok_or_else(|| ApiError::internal("Internal server error"))?;

    let weather = state
        .weather
        .get_weather(waypoint.coordinates())
        .await
        .unwrap_or_else(WeatherResult::offline_default);

    let suggestions = state
        .advice
        .get_advice(&AdviceContext {
            route: &route,
            weather: &weather,
            vehicle: state.vehicle.as_ref(),
        })
        .await;
    debug!(?suggestions, "Generated suggestions");

    Ok(Json(AnalyzeRouteResponse {
        route,
        weather,
        suggestions,
    }))
}

async fn analyze_route_not_allowed() -> ApiError {
    ApiError::method_not_allowed("GET method not allowed for this endpoint. Use POST.")
}

async fn current_weather(
    State(state): State<AppState>,
    Query(query): Query<CurrentWeatherQuery>,
) -> Result<Json<CurrentWeatherResponse>, ApiError> {
    let (Some(lat), Some(lon)) = (
        query.lat.filter(|v| !v.is_empty()),
        query.lon.filter(|v| !v.is_empty()),
    ) else {
        return Err(ApiError::bad_request("Missing lat or lon parameters"));
    };

    let coords = parse_coordinates(&lat, &lon).ok_or_else(|| {
        debug!("Invalid current_weather coordinates: {lat}, {lon}");
        ApiError::internal("Failed to get weather data")
    })?;

    let weather = state
        .weather
        .get_weather(coords)
        .await
        .ok_or_else(|| ApiError::not_found("Weather data not available"))?;

    let city = state.weather.reverse_geocode_city(coords).await;

    Ok(Json(CurrentWeatherResponse { weather, city }))
}

fn parse_coordinates(lat: &str, lon: &str) -> Option<Coordinates> {
    let lat = lat.trim().parse().ok()?;
    let lon = lon.trim().parse().ok()?;
    Coordinates::new(lat, lon).ok()
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: VERSION,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(
            parse_coordinates("52.52", " 13.405"),
            Some(Coordinates {
                lat: 52.52,
                lon: 13.405
            })
        );
        assert_eq!(parse_coordinates("north", "13.405"), None);
        assert_eq!(parse_coordinates("95", "13.405"), None);
    }
}
