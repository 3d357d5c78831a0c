//! Place name geocoding through the TomTom search API

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::DriveWiseConfig;
use crate::models::Coordinates;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("TomTom API key not configured")]
    MissingCredential,

    #[error("Geocoding API returned status {0}")]
    Status(u16),

    #[error("No geocoding results for '{0}'")]
    NoResults(String),

    #[error("Geocoding API returned an invalid position: {0}")]
    InvalidPosition(String),

    #[error("Geocoding request failed: {0}")]
    Request(reqwest::Error),
}

// Request URLs carry API keys in their query strings
impl From<reqwest::Error> for GeocodeError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error.without_url())
    }
}

/// Resolves free-text place names to coordinates
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl Geocoder {
    pub fn new(config: &DriveWiseConfig) -> crate::Result<Self> {
        Ok(Self {
            client: crate::http_client(config.tomtom.timeout_seconds)?,
            api_key: config.tomtom.api_key.clone(),
            base_url: config.tomtom.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a place name to the coordinates of the first search result
    #[instrument(skip(self))]
    pub async fn resolve(&self, place: &str) -> Result<Coordinates, GeocodeError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GeocodeError::MissingCredential)?;

        let url = format!(
            "{}/search/2/geocode/{}.json",
            self.base_url,
            urlencoding::encode(place)
        );
        debug!("Calling the geocoding API");

        let response = self
            .client
            .get(&url)
            .query(&[("key", api_key)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            warn!(status = %response.status(), "Geocoding API error");
            return Err(GeocodeError::Status(response.status().as_u16()));
        }

        let body: GeocodeResponse = response.json().await?;
        let position = body
            .results
            .into_iter()
            .next()
            .map(|result| result.position)
            .ok_or_else(|| GeocodeError::NoResults(place.to_string()))?;

        Coordinates::new(position.lat, position.lon)
            .map_err(|e| GeocodeError::InvalidPosition(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    position: Position,
}

#[derive(Debug, Deserialize)]
struct Position {
    lat: f64,
    lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_without_credential_makes_no_call() {
        let geocoder = Geocoder::new(&DriveWiseConfig::default()).unwrap();
        let result = geocoder.resolve("Berlin").await;
        assert!(matches!(result, Err(GeocodeError::MissingCredential)));
    }

    #[test]
    fn test_geocode_response_parsing() {
        let body = r#"{"summary":{"numResults":1},"results":[{"type":"Geography","position":{"lat":52.52437,"lon":13.41053}}]}"#;
        let parsed: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].position.lat, 52.52437);
    }
}
