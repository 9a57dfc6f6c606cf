//! Measurement and prediction types shared by every stage of the workflow,
//! together with their wire shapes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::RangeInclusive;

/// Raw form contents keyed by field wire name (`"N"`, `"ph"`, ...).
pub type RawFields = HashMap<String, String>;

/// One of the seven required soil/climate inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Nitrogen,
        Field::Phosphorus,
        Field::Potassium,
        Field::Temperature,
        Field::Humidity,
        Field::Ph,
        Field::Rainfall,
    ];

    /// Name used in the form and on the wire.
    pub fn key(self) -> &'static str {
        match self {
            Field::Nitrogen => "N",
            Field::Phosphorus => "P",
            Field::Potassium => "K",
            Field::Temperature => "temperature",
            Field::Humidity => "humidity",
            Field::Ph => "ph",
            Field::Rainfall => "rainfall",
        }
    }

    /// Name used in range messages.
    pub fn label(self) -> &'static str {
        match self {
            Field::Nitrogen => "N",
            Field::Phosphorus => "P",
            Field::Potassium => "K",
            Field::Temperature => "Temperature",
            Field::Humidity => "Humidity",
            Field::Ph => "pH",
            Field::Rainfall => "Rainfall",
        }
    }

    /// Caption shown next to the form input.
    pub fn caption(self) -> &'static str {
        match self {
            Field::Nitrogen => "Nitrogen (N)",
            Field::Phosphorus => "Phosphorus (P)",
            Field::Potassium => "Potassium (K)",
            Field::Temperature => "Temperature (°C)",
            Field::Humidity => "Humidity (%)",
            Field::Ph => "Soil pH",
            Field::Rainfall => "Rainfall (mm)",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Field::Temperature => "°C",
            Field::Humidity => "%",
            Field::Rainfall => "mm",
            _ => "",
        }
    }

    /// Inclusive physical range accepted for this input.
    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            Field::Nitrogen | Field::Phosphorus | Field::Potassium => 0.0..=200.0,
            Field::Temperature => -50.0..=60.0,
            Field::Humidity => 0.0..=100.0,
            Field::Ph => 0.0..=14.0,
            Field::Rainfall => 0.0..=1000.0,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A fully validated set of measurements, serialized as the `/predict` body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementInput {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl MeasurementInput {
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Nitrogen => self.nitrogen,
            Field::Phosphorus => self.phosphorus,
            Field::Potassium => self.potassium,
            Field::Temperature => self.temperature,
            Field::Humidity => self.humidity,
            Field::Ph => self.ph,
            Field::Rainfall => self.rainfall,
        }
    }
}

/// One candidate from the service's ranked list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCrop {
    pub crop: String,
    pub probability: f64,
}

impl RankedCrop {
    pub fn new(crop: impl Into<String>, probability: f64) -> Self {
        Self {
            crop: crop.into(),
            probability,
        }
    }
}

/// Successful `/predict` reply. Optional fields may be missing or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub best_crop: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub top_predictions: Option<Vec<RankedCrop>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a non-2xx `/predict` reply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceFailure {
    #[serde(default)]
    pub error: Option<String>,
}

/// Optional details from `/health`; only ever logged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub model_loaded: Option<bool>,
    #[serde(default)]
    pub label_encoder_loaded: Option<bool>,
}

/// Raw outcome of a `/health` call that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    pub status: u16,
    pub details: Option<HealthStatus>,
}

impl HealthReport {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_serializes_with_wire_keys() {
        let input = MeasurementInput {
            nitrogen: 90.0,
            phosphorus: 42.0,
            potassium: 43.0,
            temperature: 20.8,
            humidity: 82.0,
            ph: 6.5,
            rainfall: 202.9,
        };
        let json = serde_json::to_value(input).unwrap();
        assert_eq!(json["N"], 90.0);
        assert_eq!(json["P"], 42.0);
        assert_eq!(json["K"], 43.0);
        assert_eq!(json["ph"], 6.5);
        assert_eq!(json.as_object().unwrap().len(), 7);
    }

    #[test]
    fn null_optionals_are_absent() {
        let body = r#"{"best_crop":"rice","confidence":null,"top_predictions":null}"#;
        let response: PredictionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.best_crop, "rice");
        assert!(response.confidence.is_none());
        assert!(response.top_predictions.is_none());
        assert!(response.message.is_none());
    }

    #[test]
    fn field_keys_match_wire_names() {
        let input = MeasurementInput {
            nitrogen: 1.0,
            phosphorus: 2.0,
            potassium: 3.0,
            temperature: 4.0,
            humidity: 5.0,
            ph: 6.0,
            rainfall: 7.0,
        };
        let json = serde_json::to_value(input).unwrap();
        for field in Field::ALL {
            assert_eq!(json[field.key()], input.value(field), "{}", field);
        }
    }
}
