//! Trained model artifacts.
//!
//! The classifier and the categorical encoder are produced by an offline
//! training job and shipped as JSON artifacts. They are deserialized once
//! at engine construction — a missing or corrupt artifact is a fatal
//! startup error, never handled per call.

pub mod encoder;
pub mod forest;

pub use encoder::*;
pub use forest::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model artifact not found at {0}")]
    ArtifactMissing(PathBuf),

    #[error("I/O error reading model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed model artifact: {0}")]
    Malformed(String),

    #[error("Model artifact is structurally invalid: {0}")]
    Invalid(String),

    #[error("Model expects {expected} features, the pipeline provides {actual}")]
    FeatureArity { expected: usize, actual: usize },

    #[error("Model predicts {actual} classes, triage requires {expected}")]
    ClassArity { expected: usize, actual: usize },

    #[error("Unseen arrival mode category: {0}")]
    UnseenCategory(String),
}

/// Classifier seam — the engine and explainer depend on this trait so
/// tests can substitute a stub for the trained forest.
pub trait RiskModel {
    fn n_classes(&self) -> usize;

    fn n_features(&self) -> usize;

    /// Predicted class for an ordered feature vector of `n_features` values.
    fn predict(&self, vector: &[f64]) -> usize;

    /// Per-class, per-feature additive contributions for one vector.
    /// Outer index is the class, inner index the feature column.
    fn attributions(&self, vector: &[f64]) -> Vec<Vec<f64>>;
}
