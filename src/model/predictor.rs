//! In-memory predictor built from a validated artifact

use ndarray::{Array2, Axis};
use rayon::prelude::*;

use crate::error::{Result, ScoreError};
use super::{DenseLayer, ModelArtifact};

/// Batches above this row count are scored in parallel chunks.
const PARALLEL_ROW_THRESHOLD: usize = 4096;
const CHUNK_ROWS: usize = 1024;

/// A loaded model ready to score batches.
///
/// Immutable after construction; shared across handlers via `Arc`.
#[derive(Debug, Clone)]
pub struct Predictor {
    layers: Vec<DenseLayer>,
    n_features: usize,
    n_outputs: usize,
}

impl Predictor {
    /// Build a predictor from an artifact, validating it first.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        artifact.validate()?;
        let n_features = artifact.n_inputs();
        let n_outputs = artifact.n_outputs();
        Ok(Self {
            layers: artifact.layers,
            n_features,
            n_outputs,
        })
    }

    /// Deserialize an artifact file into a ready predictor.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let artifact = ModelArtifact::from_path(path)?;
        Self::from_artifact(artifact)
    }

    /// Number of input features each row must have.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of output values produced per row.
    pub fn n_outputs(&self) -> usize {
        self.n_outputs
    }

    pub fn n_layers(&self) -> usize {
        self.layers.len()
    }

    /// Score a batch: one output vector per input row.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if x.nrows() == 0 {
            return Err(ScoreError::Prediction("empty input batch".to_string()));
        }
        if x.ncols() != self.n_features {
            return Err(ScoreError::Shape {
                expected: format!("{} features", self.n_features),
                actual: format!("{} features", x.ncols()),
            });
        }

        if x.nrows() > PARALLEL_ROW_THRESHOLD {
            self.predict_parallel(x)
        } else {
            Ok(self.forward(x))
        }
    }

    /// Forward pass through all layers.
    fn forward(&self, x: &Array2<f64>) -> Array2<f64> {
        let mut activation = x.clone();
        for layer in &self.layers {
            let z = activation.dot(&layer.weights) + &layer.bias;
            activation = layer.activation.apply(&z);
        }
        activation
    }

    /// Chunk the batch along rows and score chunks in parallel.
    fn predict_parallel(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let chunks: Vec<Array2<f64>> = x
            .axis_chunks_iter(Axis(0), CHUNK_ROWS)
            .map(|c| c.to_owned())
            .collect();

        let outputs: Vec<Array2<f64>> = chunks.par_iter().map(|c| self.forward(c)).collect();

        let views: Vec<_> = outputs.iter().map(|a| a.view()).collect();
        ndarray::concatenate(Axis(0), &views)
            .map_err(|e| ScoreError::Prediction(format!("cannot assemble chunk outputs: {}", e)))
    }
}
