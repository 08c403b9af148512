//! PHA Classifier
//!
//! Loads the exported random forest once at startup and exposes it through
//! [`HazardPredictor`], the seam inference and the API are written against.

mod forest;
mod loader;

pub use forest::{ForestArtifact, RandomForest, TreeArtifact, TreeNode, ARTIFACT_FORMAT, ARTIFACT_VERSION};
pub use loader::{load_model, ModelError, ModelStore, ModelSummary};

use crate::types::{FeatureArray, HazardLabel};

/// A binary PHA classifier over positional `[H, e, a, q, i, moid]` features.
pub trait HazardPredictor: Send + Sync {
    /// Class label for one sample.
    fn predict(&self, features: &FeatureArray) -> HazardLabel;

    /// `[P(safe), P(hazardous)]` for one sample.
    fn predict_proba(&self, features: &FeatureArray) -> [f64; 2];
}

impl HazardPredictor for RandomForest {
    fn predict(&self, features: &FeatureArray) -> HazardLabel {
        RandomForest::predict(self, features)
    }

    fn predict_proba(&self, features: &FeatureArray) -> [f64; 2] {
        RandomForest::predict_proba(self, features)
    }
}
