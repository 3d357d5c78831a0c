//! Current weather through the OpenWeather API
//!
//! Failure handling differs from routing: a non-200 answer from the
//! weather API yields `None` and the caller picks its own fallback, while
//! a missing key or any other failure yields
//! [`WeatherResult::offline_default`].

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

use crate::config::DriveWiseConfig;
use crate::models::{Coordinates, WeatherResult};

pub mod openweather;
pub mod reverse_geocode;

pub use reverse_geocode::ReverseGeocoder;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Weather API returned status {0}")]
    Status(u16),

    #[error("Weather response is missing {0}")]
    MissingData(&'static str),

    #[error("Weather request failed: {0}")]
    Request(reqwest::Error),
}

// Request URLs carry API keys in their query strings
impl From<reqwest::Error> for WeatherError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error.without_url())
    }
}

pub struct WeatherProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    reverse_geocoder: ReverseGeocoder,
}

impl WeatherProvider {
    pub fn new(config: &DriveWiseConfig) -> crate::Result<Self> {
        Ok(Self {
            client: crate::http_client(config.openweather.timeout_seconds)?,
            api_key: config.openweather.api_key.clone(),
            base_url: config.openweather.base_url.trim_end_matches('/').to_string(),
            reverse_geocoder: ReverseGeocoder::new(config)?,
        })
    }

    /// Current weather at `coords`.
    ///
    /// `None` means the weather API answered with a non-200 status.
    #[instrument(skip(self))]
    pub async fn get_weather(&self, coords: Coordinates) -> Option<WeatherResult> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("OpenWeather API key not found, using default weather");
            return Some(WeatherResult::offline_default());
        };

        match self.fetch_current(coords, api_key).await {
            Ok(weather) => Some(weather),
            Err(WeatherError::Status(status)) => {
                warn!(status, "OpenWeather API error");
                None
            }
            Err(e) => {
                error!("OpenWeather API error, using default weather: {e}");
                Some(WeatherResult::offline_default())
            }
        }
    }

    /// Display name for `coords`, see [`ReverseGeocoder::city_name`]
    pub async fn reverse_geocode_city(&self, coords: Coordinates) -> String {
        self.reverse_geocoder.city_name(coords).await
    }

    async fn fetch_current(
        &self,
        coords: Coordinates,
        api_key: &str,
    ) -> Result<WeatherResult, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        debug!("Calling the weather API");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coords.lat.to_string().as_str()),
                ("lon", coords.lon.to_string().as_str()),
                ("appid", api_key),
                ("units", "metric"),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(WeatherError::Status(response.status().as_u16()));
        }

        let body: openweather::CurrentWeatherResponse = response.json().await?;
        body.into_weather_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_weather_without_credential_is_offline_default() {
        let provider = WeatherProvider::new(&DriveWiseConfig::default()).unwrap();
        let coords = Coordinates::new(51.5074, -0.1278).unwrap();

        let weather = provider.get_weather(coords).await;
        assert_eq!(weather, Some(WeatherResult::offline_default()));
    }
}
