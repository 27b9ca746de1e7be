//! Error types for the scoring service
//!
//! Errors are grouped by the stage that produced them: model loading
//! (startup), payload parsing, payload schema checks, and prediction.
//! Nothing is retried or recovered locally; callers decide what a
//! failure means for them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    /// The registry has no entry under the requested name.
    #[error("model not found in registry: {0}")]
    ModelNotFound(String),

    /// The artifact exists but could not be read or deserialized.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// The request body is not valid JSON.
    #[error("invalid JSON payload: {0}")]
    Parse(#[source] serde_json::Error),

    /// The JSON is well-formed but does not match the expected
    /// `{"data": [[..], ..]}` shape.
    #[error("invalid payload schema: {0}")]
    Schema(String),

    /// The predictor rejected the batch.
    #[error("prediction failed: {0}")]
    Prediction(String),

    /// Input dimensions do not match what the model expects.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    Shape { expected: String, actual: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScoreError>;
