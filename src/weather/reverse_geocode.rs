//! Reverse geocoding coordinates to a display name via BigDataCloud

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::WeatherError;
use crate::config::DriveWiseConfig;
use crate::models::Coordinates;

/// Lookup succeeded but carried no usable name
pub const UNKNOWN_LOCATION: &str = "Unknown location";
/// Lookup itself failed
pub const CURRENT_LOCATION: &str = "Current location";

#[derive(Debug, Clone)]
pub struct ReverseGeocoder {
    client: Client,
    base_url: String,
}

impl ReverseGeocoder {
    pub fn new(config: &DriveWiseConfig) -> crate::Result<Self> {
        Ok(Self {
            client: crate::http_client(config.reverse_geocoding.timeout_seconds)?,
            base_url: config
                .reverse_geocoding
                .base_url
                .trim_end_matches('/')
                .to_string(),
        })
    }

    /// City, else locality, else principal subdivision.
    ///
    /// Returns [`UNKNOWN_LOCATION`] when the lookup succeeds without any of
    /// those, and [`CURRENT_LOCATION`] when the lookup fails.
    #[instrument(skip(self))]
    pub async fn city_name(&self, coords: Coordinates) -> String {
        match self.lookup(coords).await {
            Ok(Some(name)) => name,
            Ok(None) => UNKNOWN_LOCATION.to_string(),
            Err(e) => {
                warn!("Reverse geocoding error: {e}");
                CURRENT_LOCATION.to_string()
            }
        }
    }

    async fn lookup(&self, coords: Coordinates) -> Result<Option<String>, WeatherError> {
        let url = format!("{}/data/reverse-geocode-client", self.base_url);
        debug!("Calling the reverse geocoding API");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", coords.lat.to_string().as_str()),
                ("longitude", coords.lon.to_string().as_str()),
                ("localityLanguage", "en"),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(WeatherError::Status(response.status().as_u16()));
        }

        let body: ReverseGeocodeResponse = response.json().await?;
        Ok(body.display_name())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReverseGeocodeResponse {
    city: Option<String>,
    locality: Option<String>,
    principal_subdivision: Option<String>,
}

impl ReverseGeocodeResponse {
    fn display_name(self) -> Option<String> {
        [self.city, self.locality, self.principal_subdivision]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
    }
}
