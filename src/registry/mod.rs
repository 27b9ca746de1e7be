//! On-disk model registry
//!
//! Maps a model name to the artifact file that backs it. The registry is a
//! directory holding one artifact JSON per model plus an `index.json` with
//! an entry per name (relative path, dimensions, registration timestamp).
//! Initialization resolves a name through here before loading anything.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::error::{Result, ScoreError};
use crate::model::ModelArtifact;

/// Index entry for one registered model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub name: String,
    /// Artifact path relative to the registry root
    pub path: String,
    pub n_inputs: usize,
    pub n_outputs: usize,
    pub registered_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct RegistryIndex {
    models: HashMap<String, RegistryEntry>,
}

/// Model registry rooted at a directory
pub struct ModelRegistry {
    root: PathBuf,
    index: RegistryIndex,
}

impl ModelRegistry {
    /// Open a registry, creating the directory and an empty index if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();

        if !root.exists() {
            fs::create_dir_all(&root)?;
        }

        let index_path = root.join("index.json");
        let index = if index_path.exists() {
            let file = File::open(&index_path)?;
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                ScoreError::ModelLoad(format!("cannot read registry index: {}", e))
            })?
        } else {
            RegistryIndex::default()
        };

        Ok(Self { root, index })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a model name to the absolute path of its artifact.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let entry = self
            .index
            .models
            .get(name)
            .ok_or_else(|| ScoreError::ModelNotFound(name.to_string()))?;
        Ok(self.root.join(&entry.path))
    }

    /// Get the index entry for a model name.
    pub fn entry(&self, name: &str) -> Result<&RegistryEntry> {
        self.index
            .models
            .get(name)
            .ok_or_else(|| ScoreError::ModelNotFound(name.to_string()))
    }

    /// Write an artifact under a name and record it in the index.
    /// Re-registering a name replaces its artifact.
    pub fn register(&mut self, name: &str, artifact: &ModelArtifact) -> Result<PathBuf> {
        artifact.validate()?;

        let file_name = format!("{}.json", name);
        let path = self.root.join(&file_name);
        artifact.save(&path)?;

        let entry = RegistryEntry {
            name: name.to_string(),
            path: file_name,
            n_inputs: artifact.n_inputs(),
            n_outputs: artifact.n_outputs(),
            registered_at: chrono::Utc::now().to_rfc3339(),
        };
        self.index.models.insert(name.to_string(), entry);
        self.save_index()?;

        Ok(path)
    }

    /// Names of all registered models, sorted.
    pub fn list(&self) -> Vec<&RegistryEntry> {
        let mut entries: Vec<&RegistryEntry> = self.index.models.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    /// Remove a model and delete its artifact file.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let entry = self
            .index
            .models
            .remove(name)
            .ok_or_else(|| ScoreError::ModelNotFound(name.to_string()))?;

        let path = self.root.join(&entry.path);
        if path.exists() {
            fs::remove_file(&path)?;
        }

        self.save_index()
    }

    fn save_index(&self) -> Result<()> {
        let index_path = self.root.join("index.json");
        let file = File::create(&index_path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.index)
            .map_err(|e| ScoreError::ModelLoad(format!("cannot write registry index: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Activation, DenseLayer, Predictor};
    use ndarray::{arr1, arr2};

    fn small_artifact() -> ModelArtifact {
        ModelArtifact::new(vec![DenseLayer::new(
            arr2(&[[1.0, 0.0], [0.0, 1.0]]),
            arr1(&[0.0, 0.0]),
            Activation::Linear,
        )])
    }

    #[test]
    fn test_register_and_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = ModelRegistry::open(dir.path()).unwrap();

        registry.register("identity", &small_artifact()).unwrap();

        let path = registry.resolve("identity").unwrap();
        assert!(path.exists());

        let entry = registry.entry("identity").unwrap();
        assert_eq!(entry.n_inputs, 2);
        assert_eq!(entry.n_outputs, 2);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ModelRegistry::open(dir.path()).unwrap();

        assert!(matches!(
            registry.resolve("missing"),
            Err(ScoreError::ModelNotFound(_))
        ));
    }

    #[test]
    fn test_index_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut registry = ModelRegistry::open(dir.path()).unwrap();
            registry.register("identity", &small_artifact()).unwrap();
        }

        let registry = ModelRegistry::open(dir.path()).unwrap();
        assert_eq!(registry.list().len(), 1);
        assert!(registry.resolve("identity").is_ok());
    }

    #[test]
    fn test_registered_artifact_loads_as_predictor() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = ModelRegistry::open(dir.path()).unwrap();
        registry.register("identity", &small_artifact()).unwrap();

        let path = registry.resolve("identity").unwrap();
        let predictor = Predictor::load(&path).unwrap();
        assert_eq!(predictor.n_features(), 2);
        assert_eq!(predictor.n_outputs(), 2);
    }

    #[test]
    fn test_remove_deletes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = ModelRegistry::open(dir.path()).unwrap();
        registry.register("identity", &small_artifact()).unwrap();

        let path = registry.resolve("identity").unwrap();
        registry.remove("identity").unwrap();

        assert!(!path.exists());
        assert!(registry.resolve("identity").is_err());
    }

    #[test]
    fn test_list_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = ModelRegistry::open(dir.path()).unwrap();
        registry.register("b-model", &small_artifact()).unwrap();
        registry.register("a-model", &small_artifact()).unwrap();

        let names: Vec<&str> = registry.list().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a-model", "b-model"]);
    }
}
