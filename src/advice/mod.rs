//! Driving advice through the Gemini `generateContent` API
//!
//! Which advice comes back depends on how far the call got:
//!
//! | situation                          | result                              |
//! |------------------------------------|-------------------------------------|
//! | no API key                         | [`AdviceResult::fallback_basic`]    |
//! | call failed (transport, status)    | [`AdviceResult::fallback_basic`]    |
//! | call succeeded, no reply text      | [`AdviceResult::fallback_detailed`] |
//! | call succeeded, reply unparseable  | [`AdviceResult::fallback_detailed`] |
//! | call succeeded, reply parsed       | the parsed advice                   |

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

use crate::config::DriveWiseConfig;
use crate::models::{AdviceResult, RouteResult, VehicleProfile, WeatherResult};

pub mod parser;
pub mod prompt;

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("Gemini API returned status {0}")]
    Status(u16),

    #[error("Gemini request failed: {0}")]
    Request(reqwest::Error),
}

// Request URLs carry API keys in their query strings
impl From<reqwest::Error> for AdviceError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error.without_url())
    }
}

/// Everything the advice prompt is built from
#[derive(Debug, Clone, Copy)]
pub struct AdviceContext<'a> {
    pub route: &'a RouteResult,
    pub weather: &'a WeatherResult,
    pub vehicle: &'a VehicleProfile,
}

pub struct AdviceGenerator {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl AdviceGenerator {
    pub fn new(config: &DriveWiseConfig) -> crate::Result<Self> {
        Ok(Self {
            client: crate::http_client(config.gemini.timeout_seconds)?,
            api_key: config.gemini.api_key.clone(),
            base_url: config.gemini.base_url.trim_end_matches('/').to_string(),
            model: config.gemini.model.clone(),
        })
    }

    #[instrument(skip_all)]
    pub async fn get_advice(&self, context: &AdviceContext<'_>) -> AdviceResult {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("Gemini API key not configured, using basic advice");
            return AdviceResult::fallback_basic();
        };

        let prompt = prompt::build_prompt(context);
        let response = match self.generate(&prompt, api_key).await {
            Ok(response) => response,
            Err(e) => {
                error!("Gemini API error: {e}");
                return AdviceResult::fallback_basic();
            }
        };

        match parser::advice_from_response(&response) {
            Ok(advice) => advice,
            Err(e) => {
                let reply = parser::extract_text(&response);
                warn!(reply = %reply.as_str(), "Gemini API did not return usable advice: {e}");
                AdviceResult::fallback_detailed()
            }
        }
    }

    async fn generate(&self, prompt: &str, api_key: &str) -> Result<Value, AdviceError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        debug!(model = %self.model, "Calling the Gemini API");

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AdviceError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}
