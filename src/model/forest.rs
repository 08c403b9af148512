//! Random-forest classifier evaluated from a JSON export.
//!
//! Node semantics follow scikit-learn's `DecisionTreeClassifier`: a split
//! sends a sample left when `x[feature] <= threshold`, and a leaf holds the
//! per-class weights of the training samples that reached it.

use serde::{Deserialize, Serialize};

use crate::types::{FeatureArray, HazardLabel, FEATURE_COUNT, MODEL_FEATURE_ORDER};

/// `format` tag every artifact must carry.
pub const ARTIFACT_FORMAT: &str = "sklearn-random-forest-json";

/// Artifact layout version understood by this loader.
pub const ARTIFACT_VERSION: u32 = 1;

// ============================================================================
// Artifact (on-disk shape)
// ============================================================================

/// Serialized forest as written by the training notebook's exporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestArtifact {
    pub format: String,
    pub version: u32,
    pub feature_names: Vec<String>,
    pub classes: Vec<u8>,
    pub trees: Vec<TreeArtifact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One tree as a flat node array; node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArtifact {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// `[n_safe, n_hazard]`
        value: [f64; 2],
    },
}

// ============================================================================
// Validated Forest
// ============================================================================

/// A forest whose every tree has passed structural validation.
///
/// Only constructed through [`RandomForest::from_artifact`], so traversal can
/// index nodes directly.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<Vec<TreeNode>>,
    description: Option<String>,
}

impl RandomForest {
    /// Validate an artifact and build the forest. The error is a human-readable reason.
    pub fn from_artifact(artifact: ForestArtifact) -> Result<Self, String> {
        if artifact.format != ARTIFACT_FORMAT {
            return Err(format!(
                "unsupported format '{}' (expected '{}')",
                artifact.format, ARTIFACT_FORMAT
            ));
        }
        if artifact.version != ARTIFACT_VERSION {
            return Err(format!(
                "unsupported version {} (expected {})",
                artifact.version, ARTIFACT_VERSION
            ));
        }
        if artifact.feature_names.iter().map(String::as_str).ne(MODEL_FEATURE_ORDER) {
            return Err(format!(
                "feature names {:?} do not match expected order {:?}",
                artifact.feature_names, MODEL_FEATURE_ORDER
            ));
        }
        if artifact.classes != [0, 1] {
            return Err(format!("classes {:?} are not [0, 1]", artifact.classes));
        }
        if artifact.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }

        let mut trees = Vec::with_capacity(artifact.trees.len());
        for (t, tree) in artifact.trees.into_iter().enumerate() {
            validate_tree(&tree.nodes).map_err(|reason| format!("tree {t}: {reason}"))?;
            trees.push(tree.nodes);
        }

        Ok(Self {
            trees,
            description: artifact.description,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Mean over trees of each leaf's normalized class distribution.
    pub fn predict_proba(&self, x: &FeatureArray) -> [f64; 2] {
        let mut sum = [0.0; 2];
        for nodes in &self.trees {
            let [safe, hazard] = leaf_value(nodes, x);
            let total = safe + hazard;
            sum[0] += safe / total;
            sum[1] += hazard / total;
        }
        let n = self.trees.len() as f64;
        [sum[0] / n, sum[1] / n]
    }

    /// Argmax of [`predict_proba`](Self::predict_proba); a tie goes to class 0.
    pub fn predict(&self, x: &FeatureArray) -> HazardLabel {
        let [safe, hazard] = self.predict_proba(x);
        if hazard > safe {
            HazardLabel::Hazardous
        } else {
            HazardLabel::Safe
        }
    }
}

/// Walk from the root to a leaf. NaN comparisons fail and go right.
fn leaf_value(nodes: &[TreeNode], x: &FeatureArray) -> [f64; 2] {
    let mut idx = 0;
    loop {
        match &nodes[idx] {
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                idx = if x[*feature] <= *threshold { *left } else { *right };
            }
            TreeNode::Leaf { value } => return *value,
        }
    }
}

/// Children must point strictly forward, which rules out cycles and
/// guarantees every walk terminates at a leaf.
fn validate_tree(nodes: &[TreeNode]) -> Result<(), String> {
    if nodes.is_empty() {
        return Err("no nodes".to_string());
    }
    for (idx, node) in nodes.iter().enumerate() {
        match node {
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= FEATURE_COUNT {
                    return Err(format!("node {idx}: feature index {feature} out of range"));
                }
                if !threshold.is_finite() {
                    return Err(format!("node {idx}: non-finite threshold"));
                }
                for child in [*left, *right] {
                    if child >= nodes.len() {
                        return Err(format!("node {idx}: child {child} out of range"));
                    }
                    if child <= idx {
                        return Err(format!("node {idx}: child {child} does not point forward"));
                    }
                }
            }
            TreeNode::Leaf { value } => {
                if value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                    return Err(format!("node {idx}: leaf weights must be finite and non-negative"));
                }
                if value[0] + value[1] <= 0.0 {
                    return Err(format!("node {idx}: empty leaf"));
                }
            }
        }
    }
    Ok(())
}
