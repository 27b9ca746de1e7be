//! The scoring service

use ndarray::Array2;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::error::Result;
use crate::model::Predictor;
use crate::monitoring::{ScoreMetrics, ScoreStats};
use crate::registry::ModelRegistry;
use super::parse_payload;

/// Per-process scoring service.
///
/// The predictor is injected at construction, so a scorer cannot exist
/// without a loaded model and every scoring call reads the same immutable
/// predictor. Cheap to clone; clones share the predictor and metrics.
#[derive(Clone)]
pub struct Scorer {
    model_name: String,
    predictor: Arc<Predictor>,
    metrics: Arc<ScoreMetrics>,
}

impl Scorer {
    pub fn new(model_name: impl Into<String>, predictor: Arc<Predictor>) -> Self {
        Self {
            model_name: model_name.into(),
            predictor,
            metrics: Arc::new(ScoreMetrics::default()),
        }
    }

    /// Initialization hook: resolve a model name through the registry and
    /// deserialize its artifact. Fails loudly on an unknown name or a bad
    /// artifact; nothing is loaded in that case.
    pub fn from_registry(registry: &ModelRegistry, name: &str) -> Result<Self> {
        let path = registry.resolve(name)?;
        let predictor = Predictor::load(&path)?;

        info!(
            model = %name,
            path = %path.display(),
            n_features = predictor.n_features(),
            n_outputs = predictor.n_outputs(),
            "Model loaded"
        );

        Ok(Self::new(name, Arc::new(predictor)))
    }

    /// Scoring hook: parse a raw body, extract the `data` batch, and run
    /// the predictor on it. All failures propagate to the caller.
    pub fn score_raw(&self, raw: &str) -> Result<Array2<f64>> {
        let start = Instant::now();

        let result = parse_payload(raw).and_then(|x| self.predictor.predict(&x));

        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        match &result {
            Ok(predictions) => {
                self.metrics.record_latency(latency_ms);
                self.metrics.record_rows(predictions.nrows() as u64);
            }
            Err(_) => self.metrics.record_error(),
        }

        result
    }

    /// Score an already-parsed feature batch.
    pub fn score_batch(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let start = Instant::now();

        let result = self.predictor.predict(x);

        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        match &result {
            Ok(predictions) => {
                self.metrics.record_latency(latency_ms);
                self.metrics.record_rows(predictions.nrows() as u64);
            }
            Err(_) => self.metrics.record_error(),
        }

        result
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    pub fn stats(&self) -> ScoreStats {
        self.metrics.snapshot()
    }
}
