//! Error types for winepress

use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum WinepressError {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Training error: {0}")]
    TrainingError(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Tracking error: {0}")]
    TrackingError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, WinepressError>;
