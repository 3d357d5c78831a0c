//! Static vehicle profile

use serde::{Deserialize, Serialize};

/// Vehicle characteristics fed into the advice prompt.
///
/// Read once from configuration and shared read-only across requests.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct VehicleProfile {
    pub fuel_type: String,
    pub weight_kg: f64,
    pub max_power_kw: f64,
}

impl Default for VehicleProfile {
    fn default() -> Self {
        Self {
            fuel_type: "gasoline".to_string(),
            weight_kg: 1500.0,
            max_power_kw: 120.0,
        }
    }
}
