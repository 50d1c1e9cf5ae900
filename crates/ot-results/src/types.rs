//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub model_name: String,
    /// Case selector, `hot` or `cold`.
    pub case: String,
    pub timestamp: String,
    pub dt_s: f64,
    pub duration_s: f64,
    pub steps: usize,
    /// `shared` or `per_face`.
    pub solar_model: String,
    pub solver_version: String,
}

/// One history column as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeseriesRecord {
    pub time_s: f64,
    pub theta_deg: f64,
    /// 15 temperatures [K]: nodes 1..13, planet, space.
    pub temperatures_k: Vec<f64>,
}

/// Temperature unit for exported tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    #[default]
    Kelvin,
    Celsius,
}

impl TemperatureUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            TemperatureUnit::Kelvin => "K",
            TemperatureUnit::Celsius => "C",
        }
    }

    pub fn convert(self, kelvin: f64) -> f64 {
        match self {
            TemperatureUnit::Kelvin => kelvin,
            TemperatureUnit::Celsius => ot_core::k_to_c(kelvin),
        }
    }
}

/// RFC 3339 UTC timestamp for a new manifest.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339()
}
