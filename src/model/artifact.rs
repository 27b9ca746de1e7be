//! Serialized model artifact format

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoreError};

/// Activation function applied after a dense layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    ReLU,
    Sigmoid,
    Tanh,
    Linear,
    Softmax,
}

impl Default for Activation {
    fn default() -> Self {
        Self::Linear
    }
}

impl Activation {
    /// Apply the activation element-wise (row-wise for softmax).
    pub fn apply(&self, z: &Array2<f64>) -> Array2<f64> {
        match self {
            Activation::ReLU => z.mapv(|v| v.max(0.0)),
            Activation::Sigmoid => z.mapv(|v| 1.0 / (1.0 + (-v).exp())),
            Activation::Tanh => z.mapv(|v| v.tanh()),
            Activation::Linear => z.clone(),
            Activation::Softmax => {
                let mut out = z.clone();
                for mut row in out.axis_iter_mut(Axis(0)) {
                    // Shift by the row max for numerical stability
                    let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    row.mapv_inplace(|v| (v - max).exp());
                    let sum: f64 = row.iter().sum();
                    if sum > 0.0 {
                        row.mapv_inplace(|v| v / sum);
                    }
                }
                out
            }
        }
    }
}

/// One dense layer: `output = activation(input . weights + bias)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    /// Weight matrix of shape (n_in, n_out)
    pub weights: Array2<f64>,
    /// Bias vector of length n_out
    pub bias: Array1<f64>,
    #[serde(default)]
    pub activation: Activation,
}

impl DenseLayer {
    pub fn new(weights: Array2<f64>, bias: Array1<f64>, activation: Activation) -> Self {
        Self {
            weights,
            bias,
            activation,
        }
    }

    pub fn n_inputs(&self) -> usize {
        self.weights.nrows()
    }

    pub fn n_outputs(&self) -> usize {
        self.weights.ncols()
    }
}

/// A complete serialized model: the on-disk artifact format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub layers: Vec<DenseLayer>,
}

impl ModelArtifact {
    pub fn new(layers: Vec<DenseLayer>) -> Self {
        Self { layers }
    }

    /// Input width expected by the first layer.
    pub fn n_inputs(&self) -> usize {
        self.layers.first().map(|l| l.n_inputs()).unwrap_or(0)
    }

    /// Output width produced by the last layer.
    pub fn n_outputs(&self) -> usize {
        self.layers.last().map(|l| l.n_outputs()).unwrap_or(0)
    }

    /// Check internal consistency: at least one layer, bias lengths match
    /// layer widths, and consecutive layer widths line up.
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(ScoreError::ModelLoad("artifact has no layers".to_string()));
        }

        for (i, layer) in self.layers.iter().enumerate() {
            if layer.bias.len() != layer.n_outputs() {
                return Err(ScoreError::ModelLoad(format!(
                    "layer {}: bias length {} does not match output width {}",
                    i,
                    layer.bias.len(),
                    layer.n_outputs()
                )));
            }
        }

        for (i, pair) in self.layers.windows(2).enumerate() {
            if pair[0].n_outputs() != pair[1].n_inputs() {
                return Err(ScoreError::ModelLoad(format!(
                    "layer {} output width {} does not match layer {} input width {}",
                    i,
                    pair[0].n_outputs(),
                    i + 1,
                    pair[1].n_inputs()
                )));
            }
        }

        Ok(())
    }

    /// Read an artifact from a JSON file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ScoreError::ModelLoad(format!(
                "cannot read artifact {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let artifact: Self = serde_json::from_str(&raw)
            .map_err(|e| ScoreError::ModelLoad(format!("cannot deserialize artifact: {}", e)))?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Write the artifact as JSON.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ScoreError::ModelLoad(format!("cannot serialize artifact: {}", e)))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    fn two_layer_artifact() -> ModelArtifact {
        ModelArtifact::new(vec![
            DenseLayer::new(
                arr2(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]),
                arr1(&[0.0, 0.0]),
                Activation::ReLU,
            ),
            DenseLayer::new(arr2(&[[1.0], [1.0]]), arr1(&[0.5]), Activation::Linear),
        ])
    }

    #[test]
    fn test_dimensions() {
        let artifact = two_layer_artifact();
        assert_eq!(artifact.n_inputs(), 3);
        assert_eq!(artifact.n_outputs(), 1);
        assert!(artifact.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty() {
        let artifact = ModelArtifact::new(vec![]);
        assert!(matches!(
            artifact.validate(),
            Err(ScoreError::ModelLoad(_))
        ));
    }

    #[test]
    fn test_validate_rejects_mismatched_widths() {
        // First layer emits 2 values, second expects 3
        let artifact = ModelArtifact::new(vec![
            DenseLayer::new(
                arr2(&[[1.0, 0.0], [0.0, 1.0]]),
                arr1(&[0.0, 0.0]),
                Activation::Linear,
            ),
            DenseLayer::new(
                arr2(&[[1.0], [1.0], [1.0]]),
                arr1(&[0.0]),
                Activation::Linear,
            ),
        ]);
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_bias() {
        let artifact = ModelArtifact::new(vec![DenseLayer::new(
            arr2(&[[1.0, 0.0], [0.0, 1.0]]),
            arr1(&[0.0]),
            Activation::Linear,
        )]);
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn test_artifact_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        let artifact = two_layer_artifact();
        artifact.save(&path).unwrap();

        let loaded = ModelArtifact::from_path(&path).unwrap();
        assert_eq!(loaded.n_inputs(), 3);
        assert_eq!(loaded.layers.len(), 2);
        assert_eq!(loaded.layers[0].activation, Activation::ReLU);
    }

    #[test]
    fn test_softmax_rows_sum_to_one() {
        let z = arr2(&[[1.0, 2.0, 3.0], [0.0, 0.0, 0.0]]);
        let out = Activation::Softmax.apply(&z);
        for row in out.axis_iter(Axis(0)) {
            let sum: f64 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_relu_clamps_negatives() {
        let z = arr2(&[[-1.0, 0.0, 2.0]]);
        let out = Activation::ReLU.apply(&z);
        assert_eq!(out[[0, 0]], 0.0);
        assert_eq!(out[[0, 2]], 2.0);
    }
}
