//! OpenWeather current weather response structures

use serde::Deserialize;

use super::WeatherError;
use crate::models::{WeatherResult, ms_to_kmh};

/// Response of `/data/2.5/weather` with `units=metric`
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    pub rain: Option<Precipitation>,
    pub wind: Wind,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    /// Celsius
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub struct WeatherCondition {
    /// Condition group, e.g. "Rain", "Clouds"
    pub main: String,
}

#[derive(Debug, Deserialize)]
pub struct Precipitation {
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Wind {
    /// m/s
    pub speed: f64,
}

impl CurrentWeatherResponse {
    pub fn into_weather_result(self) -> Result<WeatherResult, WeatherError> {
        let conditions = self
            .weather
            .into_iter()
            .next()
            .map(|condition| condition.main)
            .ok_or(WeatherError::MissingData("weather conditions"))?;

        Ok(WeatherResult {
            temp_c: self.main.temp,
            conditions,
            rain_mm: self.rain.and_then(|rain| rain.one_hour).unwrap_or(0.0),
            wind_speed_kmh: ms_to_kmh(self.wind.speed),
        })
    }
}
