//! Integration tests for the DriveWise HTTP API

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use drivewise::{AppState, DriveWiseConfig, web};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// App with no upstream credentials, so nothing leaves the process
fn offline_app() -> Router {
    app_with(DriveWiseConfig::default())
}

fn app_with(config: DriveWiseConfig) -> Router {
    let state = AppState::from_config(&config).unwrap();
    web::app(state, "static")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(offline_app(), get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], drivewise::VERSION);
}

#[tokio::test]
async fn test_analyze_route_offline_coordinates() {
    let request = post_json(
        "/api/analyze_route",
        &json!({"start": "40.7128,-74.0060", "end": "34.0522,-118.2437"}),
    );
    let (status, body) = send(offline_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["route"],
        json!({
            "distance_km": 50.0,
            "duration_min": 45.0,
            "waypoints": [{"lat": 40.7128, "lon": -74.006, "speed_limit_kmh": 80.0}],
            "traffic_delay_sec": 300
        })
    );
    assert_eq!(
        body["weather"],
        json!({"temp_c": 20.0, "conditions": "Clear", "rain_mm": 0.0, "wind_speed_kmh": 10.0})
    );
    assert_eq!(
        body["suggestions"],
        json!({
            "recommended_speed_kmh": 80,
            "throttle_advice": "Maintain steady throttle for fuel efficiency",
            "terrain_advice": "Adjust speed based on road conditions"
        })
    );
}

#[tokio::test]
async fn test_analyze_route_offline_place_name_not_found() {
    let request = post_json(
        "/api/analyze_route",
        &json!({"start": "Berlin", "end": "Munich"}),
    );
    let (status, body) = send(offline_app(), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Route not found"}));
}

#[tokio::test]
async fn test_analyze_route_missing_fields() {
    for payload in [json!({}), json!({"start": "52.52,13.405"}), json!({"start": 1, "end": 2})] {
        let (status, body) = send(offline_app(), post_json("/api/analyze_route", &payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert_eq!(body, json!({"error": "Missing start or end coordinates"}));
    }
}

#[tokio::test]
async fn test_analyze_route_invalid_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/analyze_route")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(offline_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing start or end coordinates"}));
}

#[tokio::test]
async fn test_analyze_route_get_not_allowed() {
    let (status, body) = send(offline_app(), get("/api/analyze_route")).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body,
        json!({"error": "GET method not allowed for this endpoint. Use POST."})
    );
}

#[tokio::test]
async fn test_current_weather_missing_params() {
    for uri in [
        "/api/current_weather",
        "/api/current_weather?lat=52.52",
        "/api/current_weather?lat=&lon=13.405",
    ] {
        let (status, body) = send(offline_app(), get(uri)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {uri}");
        assert_eq!(body, json!({"error": "Missing lat or lon parameters"}));
    }
}

#[tokio::test]
async fn test_current_weather_non_numeric() {
    let (status, body) = send(offline_app(), get("/api/current_weather?lat=north&lon=13.405")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to get weather data"}));
}

#[tokio::test]
async fn test_current_weather_offline_with_city() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/reverse-geocode-client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "city": "Berlin",
            "locality": "Mitte",
            "countryName": "Germany"
        })))
        .mount(&server)
        .await;

    let mut config = DriveWiseConfig::default();
    config.reverse_geocoding.base_url = server.uri();

    let (status, body) = send(
        app_with(config),
        get("/api/current_weather?lat=52.52&lon=13.405"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Berlin");
    assert_eq!(body["weather"]["conditions"], "Clear");
}

#[tokio::test]
async fn test_current_weather_upstream_status_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let mut config = DriveWiseConfig::default();
    config.openweather.api_key = Some("test-key".to_string());
    config.openweather.base_url = server.uri();
    config.reverse_geocoding.base_url = server.uri();

    let (status, body) = send(
        app_with(config),
        get("/api/current_weather?lat=52.52&lon=13.405"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Weather data not available"}));
}

#[tokio::test]
async fn test_analyze_route_weather_status_uses_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut config = DriveWiseConfig::default();
    config.openweather.api_key = Some("test-key".to_string());
    config.openweather.base_url = server.uri();

    let request = post_json(
        "/api/analyze_route",
        &json!({"start": "52.52,13.405", "end": "48.1351,11.5820"}),
    );
    let (status, body) = send(app_with(config), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weather"]["temp_c"], 20.0);
    assert_eq!(body["route"]["waypoints"][0]["lat"], 52.52);
}

#[tokio::test]
async fn test_landing_page_is_served() {
    let response = offline_app().oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&bytes).contains("DriveWise"));
}
