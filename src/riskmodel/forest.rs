//! Ensemble tree classifier loaded from a JSON artifact.
//!
//! The artifact carries every tree as a flat node array. Each node stores
//! the class-probability distribution observed at that node during
//! training, which makes two things possible without any extra data:
//! prediction (average the reached leaf distributions, take the argmax)
//! and additive path attribution (each split's change in class
//! probability is credited to the split feature, so contributions plus
//! the root prior sum exactly to the leaf probability).

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ModelError, RiskModel};

/// One node of a decision tree. Split nodes carry `feature`, `threshold`
/// and both child indices; leaves carry none of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default)]
    pub feature: Option<usize>,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub left: Option<usize>,
    #[serde(default)]
    pub right: Option<usize>,
    /// Class-probability distribution at this node, `n_classes` long.
    pub distribution: Vec<f64>,
}

impl TreeNode {
    fn is_leaf(&self) -> bool {
        self.feature.is_none()
    }
}

/// A single decision tree, nodes indexed from the root at 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk the tree for one vector and return the reached leaf.
    /// Values `<=` threshold descend left, matching the training split
    /// convention.
    fn leaf_for(&self, vector: &[f64]) -> &TreeNode {
        let mut node = &self.nodes[0];
        while let (Some(feature), Some(threshold)) = (node.feature, node.threshold) {
            let child = if vector[feature] <= threshold {
                node.left
            } else {
                node.right
            };
            match child {
                Some(idx) => node = &self.nodes[idx],
                None => break,
            }
        }
        node
    }

    /// Credit each split's probability change to the split feature.
    fn accumulate_path(&self, vector: &[f64], contributions: &mut [Vec<f64>]) {
        let mut node = &self.nodes[0];
        while let (Some(feature), Some(threshold)) = (node.feature, node.threshold) {
            let child_idx = if vector[feature] <= threshold {
                node.left
            } else {
                node.right
            };
            let child = match child_idx {
                Some(idx) => &self.nodes[idx],
                None => break,
            };
            for (class, row) in contributions.iter_mut().enumerate() {
                row[feature] += child.distribution[class] - node.distribution[class];
            }
            node = child;
        }
    }
}

/// The trained ensemble. Deserialized once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskForest {
    pub n_classes: usize,
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl RiskForest {
    /// Load and structurally validate the forest artifact. Any defect is
    /// fatal here so that per-call prediction can stay infallible.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::ArtifactMissing(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let forest: RiskForest =
            serde_json::from_str(&raw).map_err(|e| ModelError::Malformed(e.to_string()))?;
        forest.validate()?;
        Ok(forest)
    }

    /// Averaged class-probability distribution across all trees.
    pub fn class_probabilities(&self, vector: &[f64]) -> Vec<f64> {
        let mut probs = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let leaf = tree.leaf_for(vector);
            for (p, d) in probs.iter_mut().zip(&leaf.distribution) {
                *p += d;
            }
        }
        let n = self.trees.len() as f64;
        for p in &mut probs {
            *p /= n;
        }
        probs
    }

    /// Averaged root prior — the attribution baseline.
    pub fn baseline(&self) -> Vec<f64> {
        let mut prior = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (p, d) in prior.iter_mut().zip(&tree.nodes[0].distribution) {
                *p += d;
            }
        }
        let n = self.trees.len() as f64;
        for p in &mut prior {
            *p /= n;
        }
        prior
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.n_classes < 2 {
            return Err(ModelError::Invalid("fewer than 2 classes".into()));
        }
        if self.n_features == 0 {
            return Err(ModelError::Invalid("no features".into()));
        }
        if self.trees.is_empty() {
            return Err(ModelError::Invalid("forest has no trees".into()));
        }
        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ModelError::Invalid(format!("tree {t} has no nodes")));
            }
            for (n, node) in tree.nodes.iter().enumerate() {
                if node.distribution.len() != self.n_classes {
                    return Err(ModelError::Invalid(format!(
                        "tree {t} node {n}: distribution has {} entries, expected {}",
                        node.distribution.len(),
                        self.n_classes
                    )));
                }
                if node.is_leaf() {
                    continue;
                }
                let feature = node.feature.unwrap_or_default();
                if feature >= self.n_features {
                    return Err(ModelError::Invalid(format!(
                        "tree {t} node {n}: split feature {feature} out of range"
                    )));
                }
                if node.threshold.is_none() {
                    return Err(ModelError::Invalid(format!(
                        "tree {t} node {n}: split node without threshold"
                    )));
                }
                for child in [node.left, node.right] {
                    match child {
                        Some(idx) if idx < tree.nodes.len() && idx != n => {}
                        _ => {
                            return Err(ModelError::Invalid(format!(
                                "tree {t} node {n}: bad child index"
                            )))
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl RiskModel for RiskForest {
    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, vector: &[f64]) -> usize {
        let probs = self.class_probabilities(vector);
        // Argmax with ties going to the lowest class index.
        let mut best = 0;
        for (class, p) in probs.iter().enumerate() {
            if *p > probs[best] {
                best = class;
            }
        }
        best
    }

    fn attributions(&self, vector: &[f64]) -> Vec<Vec<f64>> {
        let mut contributions = vec![vec![0.0; self.n_features]; self.n_classes];
        for tree in &self.trees {
            tree.accumulate_path(vector, &mut contributions);
        }
        let n = self.trees.len() as f64;
        for row in &mut contributions {
            for c in row.iter_mut() {
                *c /= n;
            }
        }
        contributions
    }
}
