//! `DriveWise` - route, weather and fuel-efficient driving advice
//!
//! This library resolves a start/end pair into a driving route, looks up
//! the weather along it and asks a text-generation service for driving
//! tips. Every upstream service is optional: missing credentials and
//! upstream failures degrade to documented fixed data.

pub mod advice;
pub mod api;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod models;
pub mod routing;
pub mod weather;
pub mod web;

use std::time::Duration;

// Re-export core types for public API
pub use advice::{AdviceContext, AdviceGenerator};
pub use api::AppState;
pub use config::DriveWiseConfig;
pub use error::DriveWiseError;
pub use geocoding::Geocoder;
pub use models::{AdviceResult, Coordinates, PlaceQuery, RouteResult, VehicleProfile, WeatherResult};
pub use routing::RouteService;
pub use weather::WeatherProvider;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DriveWiseError>;

/// HTTP client shared by one upstream component
pub(crate) fn http_client(timeout_seconds: u32) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds.into()))
        .user_agent(format!("DriveWise/{VERSION}"))
        .build()
        .map_err(|e| DriveWiseError::config(format!("Failed to create HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_http_client_builds() {
        assert!(http_client(5).is_ok());
    }
}
