//! Model artifacts and the in-memory predictor
//!
//! A model artifact is a serialized feed-forward network: an ordered list
//! of dense layers with a weight matrix, bias vector, and activation each.
//! Loading an artifact validates that consecutive layer widths line up and
//! produces a [`Predictor`], which is immutable and safe to share across
//! request handlers.

mod artifact;
mod predictor;

pub use artifact::{Activation, DenseLayer, ModelArtifact};
pub use predictor::Predictor;
