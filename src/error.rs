//! Error types for the crypto_forecast crate

use thiserror::Error;

/// Custom error types for the crypto_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Data retrieval produced nothing for the requested ticker/range
    #[error("No data available for the requested ticker and date range")]
    NoData,

    /// Raw price series too short to produce any complete feature row
    #[error("Insufficient history: {rows} rows, need at least 31 to build a feature row")]
    InsufficientHistory { rows: usize },

    /// Dataset too short to form a non-empty train/holdout split
    #[error("Insufficient data: {rows} rows cannot be split into non-empty train and holdout sets")]
    InsufficientData { rows: usize },

    /// Prediction requested before the forecaster was trained
    #[error("Forecaster has not been trained; call train first")]
    NotTrained,

    /// A second train call on an already trained forecaster
    #[error("Forecaster is already trained; construct a fresh instance to retrain")]
    AlreadyTrained,

    /// Underlying model inference failure
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from model serialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
