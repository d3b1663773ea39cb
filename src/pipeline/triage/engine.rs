//! Triage decision engine — safety rules composed with the classifier.
//!
//! Two stages: the deterministic rule registry is evaluated first and a
//! firing rule strictly overrides the model. Only when no rule matches
//! is the record encoded and handed to the trained classifier. The
//! model artifacts are loaded once at construction; a missing or corrupt
//! artifact aborts startup rather than failing per call.

use std::path::Path;

use crate::config;
use crate::models::{DecisionSource, Feature, FeatureRecord, TriageDecision, TRIAGE_LEVELS};
use crate::riskmodel::{ArrivalEncoder, ModelError, RiskForest, RiskModel};

use super::department::recommend_department;
use super::rules::first_matching;

pub struct TriageEngine {
    model: Box<dyn RiskModel + Send + Sync>,
    encoder: ArrivalEncoder,
}

impl TriageEngine {
    /// Assemble the engine from an already-loaded model and encoder,
    /// verifying they fit the pipeline's feature space.
    pub fn new(
        model: Box<dyn RiskModel + Send + Sync>,
        encoder: ArrivalEncoder,
    ) -> Result<Self, ModelError> {
        if model.n_features() != Feature::ORDER.len() {
            return Err(ModelError::FeatureArity {
                expected: model.n_features(),
                actual: Feature::ORDER.len(),
            });
        }
        if model.n_classes() != TRIAGE_LEVELS {
            return Err(ModelError::ClassArity {
                expected: TRIAGE_LEVELS,
                actual: model.n_classes(),
            });
        }
        Ok(Self { model, encoder })
    }

    /// Deserialize both artifacts from the models directory.
    /// This is the single fatal-at-startup point of the pipeline.
    pub fn load(models_dir: &Path) -> Result<Self, ModelError> {
        let forest = RiskForest::load(&models_dir.join(config::RISK_MODEL_FILE))?;
        let encoder = ArrivalEncoder::load(&models_dir.join(config::ARRIVAL_ENCODER_FILE))?;
        tracing::info!(
            trees = forest.trees.len(),
            categories = encoder.categories().len(),
            "Triage model artifacts loaded"
        );
        Self::new(Box::new(forest), encoder)
    }

    /// Final triage level for a complete record. Rules win.
    ///
    /// The only error path is an arrival-mode category the fitted
    /// encoder does not know — surfaced to the caller, no recovery.
    pub fn decide(&self, record: &FeatureRecord) -> Result<TriageDecision, ModelError> {
        let department = recommend_department(record).to_string();

        if let Some(rule) = first_matching(record) {
            tracing::warn!(
                rule = rule.id,
                level = rule.level,
                "Safety rule override — model output discarded"
            );
            return Ok(TriageDecision {
                level: rule.level,
                department,
                source: DecisionSource::Rule,
                rule_reason: Some(rule.reason.to_string()),
            });
        }

        let vector = record.to_vector(&self.encoder)?;
        let level = self.model.predict(&vector) as u8;
        Ok(TriageDecision {
            level,
            department,
            source: DecisionSource::Model,
            rule_reason: None,
        })
    }

    pub fn model(&self) -> &(dyn RiskModel + Send + Sync) {
        self.model.as_ref()
    }

    pub fn encoder(&self) -> &ArrivalEncoder {
        &self.encoder
    }
}
