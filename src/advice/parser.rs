//! Turning a `generateContent` response into an [`AdviceResult`]

use serde_json::Value;
use thiserror::Error;

use crate::models::AdviceResult;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("reply is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("reply is not a JSON object")]
    NotAnObject,

    #[error("response carries no reply text")]
    NoReplyText,
}

/// Text pulled out of a response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyText {
    /// Text the model produced
    Model(String),
    /// No reply text was found; the serialized response body
    Unrecognized(String),
}

impl ReplyText {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Model(text) | Self::Unrecognized(text) => text,
        }
    }
}

type ExtractionStrategy = fn(&Value) -> Option<ReplyText>;

/// Tried in order; the first strategy yielding text wins
const EXTRACTION_STRATEGIES: [ExtractionStrategy; 3] =
    [first_candidate_text, top_level_text, whole_response];

/// Pull the model's reply text out of a response body
#[must_use]
pub fn extract_text(response: &Value) -> ReplyText {
    EXTRACTION_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(response))
        .unwrap_or_else(|| ReplyText::Unrecognized(String::new()))
}

/// `candidates[0].content.parts[0].text`
fn first_candidate_text(response: &Value) -> Option<ReplyText> {
    non_empty(response.pointer("/candidates/0/content/parts/0/text")?)
}

fn top_level_text(response: &Value) -> Option<ReplyText> {
    non_empty(response.get("text")?)
}

fn whole_response(response: &Value) -> Option<ReplyText> {
    Some(ReplyText::Unrecognized(response.to_string()))
}

fn non_empty(value: &Value) -> Option<ReplyText> {
    value
        .as_str()
        .filter(|text| !text.is_empty())
        .map(|text| ReplyText::Model(text.to_string()))
}

/// Advice from a full response body.
///
/// Only model text is parsed. A body without reply text, such as a blocked
/// prompt, is never returned as advice.
pub fn advice_from_response(response: &Value) -> Result<AdviceResult, ParseError> {
    match extract_text(response) {
        ReplyText::Model(text) => parse_advice(&text),
        ReplyText::Unrecognized(_) => Err(ParseError::NoReplyText),
    }
}

/// Strip a surrounding markdown code fence, with or without a `json` tag
#[must_use]
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    }
    if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Parse reply text as advice, unwrapping one level of string-encoded JSON
pub fn parse_advice(raw: &str) -> Result<AdviceResult, ParseError> {
    let value: Value = serde_json::from_str(strip_code_fence(raw))?;
    let value = match value {
        Value::String(inner) => serde_json::from_str(&inner)?,
        other => other,
    };
    AdviceResult::from_value(value).ok_or(ParseError::NotAnObject)
}
