//! Configuration management for `DriveWise`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings. Upstream API
//! keys are optional: a missing key switches the matching component into
//! its offline mode instead of failing startup.

use crate::DriveWiseError;
use crate::models::VehicleProfile;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `DriveWise`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveWiseConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// TomTom routing and search API
    pub tomtom: TomTomConfig,
    /// OpenWeather current weather API
    pub openweather: OpenWeatherConfig,
    /// Reverse geocoding used for display names
    pub reverse_geocoding: ReverseGeocodingConfig,
    /// Gemini text generation API
    pub gemini: GeminiConfig,
    /// Static vehicle profile used for advice prompts
    pub vehicle: VehicleProfile,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Directory served for the landing page
    pub static_dir: String,
}

/// TomTom API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TomTomConfig {
    /// TomTom API key
    pub api_key: Option<String>,
    /// Base URL for the TomTom API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// OpenWeather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenWeatherConfig {
    /// OpenWeather API key
    pub api_key: Option<String>,
    /// Base URL for the OpenWeather API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Reverse geocoding configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReverseGeocodingConfig {
    /// Base URL for the reverse geocoding API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Gemini API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Gemini API key
    pub api_key: Option<String>,
    /// Base URL for the Gemini API
    pub base_url: String,
    /// Model used for `generateContent`
    pub model: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    5000
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_tomtom_base_url() -> String {
    "https://api.tomtom.com".to_string()
}

fn default_openweather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_reverse_geocoding_base_url() -> String {
    "https://api.bigdatacloud.net".to_string()
}

fn default_reverse_geocoding_timeout() -> u32 {
    5
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_request_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for TomTomConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_tomtom_base_url(),
            timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openweather_base_url(),
            timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for ReverseGeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_reverse_geocoding_base_url(),
            timeout_seconds: default_reverse_geocoding_timeout(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Conventional environment variable names for the upstream credentials
const TOMTOM_KEY_VAR: &str = "TOMTOM_API_KEY";
const OPENWEATHER_KEY_VAR: &str = "OPENWEATHER_API_KEY";
const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";

impl DriveWiseConfig {
    /// Load configuration from `config_path`, else the default file
    /// locations, layered under environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // DRIVEWISE_TOMTOM__API_KEY, DRIVEWISE_SERVER__PORT, ...
        builder = builder.add_source(
            Environment::with_prefix("DRIVEWISE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: DriveWiseConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_credentials_from(|name| std::env::var(name).ok());
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("drivewise").join("config.toml"))
    }

    /// Fill credentials that are still unset from the conventional
    /// `TOMTOM_API_KEY`, `OPENWEATHER_API_KEY` and `GEMINI_API_KEY` variables.
    pub fn apply_credentials_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.tomtom.api_key.is_none() {
            self.tomtom.api_key = lookup(TOMTOM_KEY_VAR);
        }
        if self.openweather.api_key.is_none() {
            self.openweather.api_key = lookup(OPENWEATHER_KEY_VAR);
        }
        if self.gemini.api_key.is_none() {
            self.gemini.api_key = lookup(GEMINI_KEY_VAR);
        }
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        for key in [
            &mut self.tomtom.api_key,
            &mut self.openweather.api_key,
            &mut self.gemini.api_key,
        ] {
            if key.as_deref().is_some_and(|k| k.trim().is_empty()) {
                *key = None;
            }
        }

        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.tomtom.base_url.is_empty() {
            self.tomtom.base_url = default_tomtom_base_url();
        }
        if self.tomtom.timeout_seconds == 0 {
            self.tomtom.timeout_seconds = default_request_timeout();
        }
        if self.openweather.base_url.is_empty() {
            self.openweather.base_url = default_openweather_base_url();
        }
        if self.openweather.timeout_seconds == 0 {
            self.openweather.timeout_seconds = default_request_timeout();
        }
        if self.reverse_geocoding.base_url.is_empty() {
            self.reverse_geocoding.base_url = default_reverse_geocoding_base_url();
        }
        if self.reverse_geocoding.timeout_seconds == 0 {
            self.reverse_geocoding.timeout_seconds = default_reverse_geocoding_timeout();
        }
        if self.gemini.base_url.is_empty() {
            self.gemini.base_url = default_gemini_base_url();
        }
        if self.gemini.model.is_empty() {
            self.gemini.model = default_gemini_model();
        }
        if self.gemini.timeout_seconds == 0 {
            self.gemini.timeout_seconds = default_request_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(DriveWiseError::config("Server port cannot be 0").into());
        }

        let timeouts = [
            ("TomTom", self.tomtom.timeout_seconds),
            ("OpenWeather", self.openweather.timeout_seconds),
            ("Reverse geocoding", self.reverse_geocoding.timeout_seconds),
            ("Gemini", self.gemini.timeout_seconds),
        ];
        for (name, timeout) in timeouts {
            if timeout > 300 {
                return Err(DriveWiseError::config(format!(
                    "{name} API timeout cannot exceed 300 seconds"
                ))
                .into());
            }
        }

        if self.vehicle.weight_kg <= 0.0 || self.vehicle.max_power_kw <= 0.0 {
            return Err(DriveWiseError::config(
                "Vehicle weight and power must be positive",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(DriveWiseError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(DriveWiseError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let base_urls = [
            ("TomTom", &self.tomtom.base_url),
            ("OpenWeather", &self.openweather.base_url),
            ("Reverse geocoding", &self.reverse_geocoding.base_url),
            ("Gemini", &self.gemini.base_url),
        ];
        for (name, url) in base_urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(DriveWiseError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.vehicle.fuel_type.trim().is_empty() {
            return Err(DriveWiseError::config("Vehicle fuel type cannot be empty").into());
        }

        Ok(())
    }
}
