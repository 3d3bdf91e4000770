//! Error types for freight-rate

use thiserror::Error;

/// Pricing engine failures.
///
/// Every variant is fatal: it points at a broken dataset or an out-of-domain
/// input, so retrying with the same arguments reproduces it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Unknown vehicle id: {vehicle_id}")]
    UnknownVehicle { vehicle_id: String },

    #[error("No base vehicle for slab weight {slab_weight_kg} kg")]
    UnknownSlabWeight { slab_weight_kg: f64 },

    #[error("No weight bucket for weight {weight_kg} kg")]
    NoWeightBucket { weight_kg: f64 },

    #[error("Vehicle {vehicle_id} has no price rows")]
    EmptyPriceTable { vehicle_id: String },

    #[error("No vehicle plan could be priced for {weight_kg} kg over {distance_km} km")]
    NoCandidate { weight_kg: f64, distance_km: f64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pricing error: {0}")]
    Engine(#[from] EngineError),

    #[error("Invalid dataset: {0}")]
    Dataset(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Excel export error: {0}")]
    Excel(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_messages_carry_context() {
        let err = EngineError::NoCandidate {
            weight_kg: 16000.0,
            distance_km: 250.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("16000"));
        assert!(msg.contains("250"));

        let err = EngineError::UnknownVehicle {
            vehicle_id: "V99".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown vehicle id: V99");
    }

    #[test]
    fn test_engine_error_converts_into_app_error() {
        let err: Error = EngineError::NoWeightBucket { weight_kg: -1.0 }.into();
        assert!(matches!(err, Error::Engine(EngineError::NoWeightBucket { .. })));
        assert!(err.to_string().starts_with("Pricing error:"));
    }
}
