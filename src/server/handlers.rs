//! HTTP request handlers

use std::sync::Arc;
use axum::{extract::State, Json};
use tracing::info;

use super::error::Result;
use super::state::AppState;

/// Score a batch of rows.
///
/// The body is taken raw: parse failures must be reported by the scoring
/// pipeline's parse stage, not by an extractor rejection.
pub async fn score(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<serde_json::Value>> {
    let request_id = uuid::Uuid::new_v4();

    let predictions = state.scorer.score_raw(&body)?;

    let rows: Vec<Vec<f64>> = predictions
        .rows()
        .into_iter()
        .map(|r| r.to_vec())
        .collect();

    info!(
        request_id = %request_id,
        model = %state.scorer.model_name(),
        rows = rows.len(),
        "Scored batch"
    );

    Ok(Json(serde_json::json!({
        "request_id": request_id.to_string(),
        "model": state.scorer.model_name(),
        "rows": rows.len(),
        "predictions": rows,
    })))
}

/// Describe the loaded model
pub async fn model_info(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let predictor = state.scorer.predictor();
    Json(serde_json::json!({
        "model": state.scorer.model_name(),
        "n_features": predictor.n_features(),
        "n_outputs": predictor.n_outputs(),
        "n_layers": predictor.n_layers(),
        "registry": state.config.registry_dir,
    }))
}

/// Scoring metrics snapshot
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let stats = state.scorer.stats();
    Json(serde_json::json!(stats))
}

/// Host CPU and memory status
pub async fn get_system_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "system": state.get_system_info(),
        "started_at": state.started_at.to_rfc3339(),
        "status": "healthy",
    }))
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Activation, DenseLayer, ModelArtifact, Predictor};
    use crate::scoring::Scorer;
    use crate::server::ServerConfig;
    use axum::response::IntoResponse;
    use ndarray::{arr1, arr2};

    fn test_state() -> Arc<AppState> {
        // y = x1 + 2*x2
        let artifact = ModelArtifact::new(vec![DenseLayer::new(
            arr2(&[[1.0], [2.0]]),
            arr1(&[0.0]),
            Activation::Linear,
        )]);
        let predictor = Predictor::from_artifact(artifact).unwrap();
        let scorer = Scorer::new("test-linear", Arc::new(predictor));

        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            registry_dir: "./models".to_string(),
            model_name: "test-linear".to_string(),
        };
        Arc::new(AppState::new(config, scorer))
    }

    #[tokio::test]
    async fn test_score_valid_body() {
        let state = test_state();
        let body = r#"{"data": [[1, 2], [3, 4]]}"#.to_string();

        let Json(response) = score(State(state), body).await.unwrap();
        assert_eq!(response["rows"], 2);
        assert_eq!(response["model"], "test-linear");

        let predictions = response["predictions"].as_array().unwrap();
        assert_eq!(predictions[0][0], 5.0);
        assert_eq!(predictions[1][0], 11.0);
    }

    #[tokio::test]
    async fn test_score_malformed_body_is_400() {
        let state = test_state();
        let err = score(State(state), "not json".to_string()).await.unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_score_wrong_width_is_422() {
        let state = test_state();
        let body = r#"{"data": [[1, 2, 3]]}"#.to_string();
        let err = score(State(state), body).await.unwrap_err();
        let response = err.into_response();
        assert_eq!(
            response.status(),
            axum::http::StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn test_model_info() {
        let state = test_state();
        let Json(response) = model_info(State(state)).await;
        assert_eq!(response["model"], "test-linear");
        assert_eq!(response["n_features"], 2);
        assert_eq!(response["n_outputs"], 1);
    }

    #[tokio::test]
    async fn test_stats_counts_requests() {
        let state = test_state();

        let body = r#"{"data": [[1, 2]]}"#.to_string();
        score(State(state.clone()), body).await.unwrap();

        let Json(response) = get_stats(State(state)).await;
        assert_eq!(response["total_requests"], 1);
        assert_eq!(response["total_rows"], 1);
    }

    #[tokio::test]
    async fn test_health() {
        let Json(response) = health_check().await;
        assert_eq!(response["status"], "ok");
    }
}
