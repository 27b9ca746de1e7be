//! Scorepoint - hosted model scoring
//!
//! Loads a pre-trained model artifact once per process and scores incoming
//! JSON-encoded numeric batches against it.
//!
//! # Modules
//!
//! - [`registry`] - On-disk model registry: name -> artifact path
//! - [`model`] - Artifact format and the in-memory predictor
//! - [`scoring`] - Payload parsing and the scoring service
//! - [`monitoring`] - Scoring latency and error metrics
//! - [`server`] - HTTP server with the scoring API
//! - [`cli`] - Command-line interface
//!
//! The scoring pipeline is two hooks: initialization resolves a registered
//! model name and deserializes its artifact into a [`model::Predictor`];
//! scoring parses `{"data": [[..], ..]}` payloads and runs the predictor
//! on the batch. The predictor is injected into [`scoring::Scorer`] at
//! construction, so scoring before initialization is unrepresentable.

pub mod error;

pub mod model;
pub mod monitoring;
pub mod registry;
pub mod scoring;

pub mod cli;
pub mod server;

pub use error::{Result, ScoreError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Result, ScoreError};
    pub use crate::model::{Activation, DenseLayer, ModelArtifact, Predictor};
    pub use crate::monitoring::{ScoreMetrics, ScoreStats};
    pub use crate::registry::{ModelRegistry, RegistryEntry};
    pub use crate::scoring::{parse_payload, Scorer};
    pub use crate::server::{run_server, AppState, ServerConfig};
}
