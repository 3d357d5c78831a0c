//! Driving advice payload
//!
//! The advice schema is advisory: the generator may return any subset of
//! the well-known keys, or extra keys, and the payload is passed through
//! to the client as the JSON object it was parsed from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const RECOMMENDED_SPEED_KMH: &str = "recommended_speed_kmh";
pub const THROTTLE_ADVICE: &str = "throttle_advice";
pub const TERRAIN_ADVICE: &str = "terrain_advice";
pub const SAFETY_MESSAGE: &str = "safety_message";
pub const EXTRA_TIPS: &str = "extra_tips";

const DEFAULT_SPEED_KMH: u32 = 80;
const DEFAULT_THROTTLE_ADVICE: &str = "Maintain steady throttle for fuel efficiency";
const DEFAULT_TERRAIN_ADVICE: &str = "Adjust speed based on road conditions";
const DEFAULT_SAFETY_MESSAGE: &str = "Drive safe and enjoy your journey!";
const DEFAULT_EXTRA_TIPS: &str = "Bring your favorite playlist and some snacks for the road!";

/// Driving advice as a JSON object
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct AdviceResult(Map<String, Value>);

impl AdviceResult {
    /// Wrap a parsed value; only JSON objects are accepted
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Three-field advice used when the generator is not configured or
    /// could not be reached
    #[must_use]
    pub fn fallback_basic() -> Self {
        let mut map = Map::new();
        map.insert(RECOMMENDED_SPEED_KMH.into(), Value::from(DEFAULT_SPEED_KMH));
        map.insert(THROTTLE_ADVICE.into(), Value::from(DEFAULT_THROTTLE_ADVICE));
        map.insert(TERRAIN_ADVICE.into(), Value::from(DEFAULT_TERRAIN_ADVICE));
        Self(map)
    }

    /// Five-field advice used when the generator replied with something
    /// that is not usable JSON
    #[must_use]
    pub fn fallback_detailed() -> Self {
        let Self(mut map) = Self::fallback_basic();
        map.insert(SAFETY_MESSAGE.into(), Value::from(DEFAULT_SAFETY_MESSAGE));
        map.insert(EXTRA_TIPS.into(), Value::from(DEFAULT_EXTRA_TIPS));
        Self(map)
    }

    /// Text value of a key, if it is a string
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Recommended speed, accepting both `85` and `"85"`
    #[must_use]
    pub fn recommended_speed_kmh(&self) -> Option<f64> {
        match self.0.get(RECOMMENDED_SPEED_KMH)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
