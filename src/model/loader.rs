//! Model artifact loading and the per-path model store.

use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use super::forest::{ForestArtifact, RandomForest, ARTIFACT_FORMAT, ARTIFACT_VERSION};
use crate::cache::MemoCache;
use crate::types::MODEL_FEATURE_ORDER;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Model artifact not found: {0}")]
    ArtifactNotFound(PathBuf),
    #[error("Model artifact {path} is corrupt: {reason}")]
    ArtifactCorrupt { path: PathBuf, reason: String },
}

impl ModelError {
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::ArtifactNotFound(_) => "ARTIFACT_NOT_FOUND",
            ModelError::ArtifactCorrupt { .. } => "ARTIFACT_CORRUPT",
        }
    }

    fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
        ModelError::ArtifactCorrupt {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Read, parse and validate a forest artifact.
pub fn load_model(path: &Path) -> Result<RandomForest, ModelError> {
    let data = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ModelError::ArtifactNotFound(path.to_path_buf()),
        _ => ModelError::corrupt(path, format!("unreadable: {e}")),
    })?;

    let artifact: ForestArtifact = serde_json::from_slice(&data)
        .map_err(|e| ModelError::corrupt(path, format!("invalid artifact JSON: {e}")))?;

    let forest =
        RandomForest::from_artifact(artifact).map_err(|reason| ModelError::corrupt(path, reason))?;

    info!(path = %path.display(), trees = forest.n_trees(), "Loaded PHA classifier");
    Ok(forest)
}

// ============================================================================
// Store
// ============================================================================

/// Loaded models keyed by artifact path. A path is read from disk at most
/// once; later lookups hand out the same `Arc`.
#[derive(Debug, Default)]
pub struct ModelStore {
    models: MemoCache<PathBuf, Arc<RandomForest>>,
}

impl ModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<RandomForest>, ModelError> {
        self.models
            .get_or_try_compute(path.to_path_buf(), || load_model(path).map(Arc::new))
    }

    /// Forget a path so the next lookup re-reads the artifact.
    pub fn evict(&mut self, path: &Path) -> bool {
        self.models.invalidate(&path.to_path_buf())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Model metadata reported by the API and the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub path: String,
    pub format: &'static str,
    pub version: u32,
    pub trees: usize,
    pub feature_order: [&'static str; 6],
    pub classes: [&'static str; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ModelSummary {
    pub fn new(path: &Path, forest: &RandomForest) -> Self {
        Self {
            path: path.display().to_string(),
            format: ARTIFACT_FORMAT,
            version: ARTIFACT_VERSION,
            trees: forest.n_trees(),
            feature_order: MODEL_FEATURE_ORDER,
            classes: ["safe", "hazardous"],
            description: forest.description().map(str::to_string),
        }
    }
}
