//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::ScoreError;

/// Wrapper that turns scoring errors into HTTP responses.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Score(#[from] ScoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Score(err) = self;

        let (status, message) = match &err {
            // Malformed request body
            ScoreError::Parse(e) => (StatusCode::BAD_REQUEST, format!("invalid JSON: {}", e)),
            ScoreError::Schema(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            // Well-formed request the model rejects
            ScoreError::Shape { expected, actual } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("shape mismatch: expected {}, got {}", expected, actual),
            ),
            ScoreError::Prediction(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),

            ScoreError::ModelNotFound(name) => {
                (StatusCode::NOT_FOUND, format!("model not found: {}", name))
            }

            // Server-side failures: log the detail, return a generic message
            ScoreError::ModelLoad(msg) => {
                tracing::error!(detail = %msg, "Model load error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            ScoreError::Io(e) => {
                tracing::error!(detail = %e, "IO error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A file system error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": true,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ScoreError) -> StatusCode {
        ApiError::Score(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        let parse = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        assert_eq!(status_of(ScoreError::Parse(parse)), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(ScoreError::Schema("missing 'data'".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ScoreError::Shape {
                expected: "3 features".into(),
                actual: "2 features".into()
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(ScoreError::ModelNotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ScoreError::ModelLoad("broken".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
