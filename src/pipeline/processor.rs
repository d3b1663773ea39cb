//! Triage pipeline orchestrator.
//!
//! Single entry point that drives one patient record through the full
//! chain: extract → complete → decide → explain → synthesize → trend →
//! append history → assemble worklist entry.
//!
//! Uses trait-based DI for the generative backend and the history store
//! so the orchestrator remains fully testable with mock implementations.
//! Batch processing is sequential with independent failure domains — a
//! failure on one patient never aborts the next.

use crate::history::{Encounter, HistoryStore};
use crate::models::FeatureRecord;
use crate::riskmodel::ModelError;
use crate::worklist::WorklistEntry;

use super::explain::explain;
use super::extraction::extract_vitals;
use super::features::{complete, ActiveFeatures};
use super::narrative::NarrativeBridge;
use super::trend::compute_trend;
use super::triage::TriageEngine;

/// Notes placeholder when a document carried no usable text.
const NO_CONTEXT_NOTE: &str = "No clinical context.";

pub struct TriageProcessor {
    engine: TriageEngine,
    bridge: NarrativeBridge,
    history: Box<dyn HistoryStore + Send + Sync>,
    active: ActiveFeatures,
}

impl TriageProcessor {
    pub fn new(
        engine: TriageEngine,
        bridge: NarrativeBridge,
        history: Box<dyn HistoryStore + Send + Sync>,
        active: ActiveFeatures,
    ) -> Self {
        Self {
            engine,
            bridge,
            history,
            active,
        }
    }

    /// Full pipeline from raw document text.
    pub fn process_text(
        &self,
        patient_id: &str,
        raw_text: &str,
    ) -> Result<WorklistEntry, ModelError> {
        let partial = extract_vitals(raw_text);
        tracing::info!(
            patient_id = %patient_id,
            empty_extraction = partial.is_empty(),
            "Vitals extracted"
        );
        let record = complete(&partial, &self.active);
        self.run(patient_id, record, raw_text)
    }

    /// Manual-intake path: a caller-built record bypasses extraction.
    /// Without notes, a one-line intake summary stands in for the
    /// document text.
    pub fn process_record(
        &self,
        patient_id: &str,
        record: FeatureRecord,
        notes: Option<&str>,
    ) -> Result<WorklistEntry, ModelError> {
        let notes = notes
            .map(str::to_string)
            .unwrap_or_else(|| intake_note(&record));
        self.run(patient_id, record, &notes)
    }

    /// Sequential batch run. Each document is processed to completion
    /// independently; per-patient errors are returned alongside the id.
    pub fn process_batch(
        &self,
        documents: &[(String, String)],
    ) -> Vec<(String, Result<WorklistEntry, ModelError>)> {
        documents
            .iter()
            .map(|(patient_id, text)| {
                let result = self.process_text(patient_id, text);
                if let Err(e) = &result {
                    tracing::error!(patient_id = %patient_id, error = %e, "Triage failed");
                }
                (patient_id.clone(), result)
            })
            .collect()
    }

    fn run(
        &self,
        patient_id: &str,
        record: FeatureRecord,
        notes: &str,
    ) -> Result<WorklistEntry, ModelError> {
        let decision = self.engine.decide(&record)?;
        tracing::info!(
            patient_id = %patient_id,
            level = decision.level,
            source = %decision.source,
            department = %decision.department,
            "Triage decision"
        );

        let ranked = explain(
            self.engine.model(),
            self.engine.encoder(),
            &record,
            &self.active,
        )?;
        let driver_summary = ranked.driver_summary();

        let notes = if notes.trim().is_empty() {
            NO_CONTEXT_NOTE
        } else {
            notes
        };
        let narrative = self
            .bridge
            .synthesize(decision.level, &driver_summary, notes);

        let prior = self.history.latest(patient_id);
        let trend = compute_trend(&record, prior.as_ref().map(|e| &e.record));
        self.history
            .append(patient_id, Encounter::new(record.clone(), decision.level));

        Ok(WorklistEntry {
            patient_id: patient_id.to_string(),
            decision,
            factors: ranked.factors,
            driver_summary,
            narrative,
            trend,
            record,
        })
    }
}

/// One-line intake note used when manual intake supplies no free text.
fn intake_note(record: &FeatureRecord) -> String {
    format!(
        "Patient arrived via {} complaining of {}/10 pain. Vitals: HR {}, SpO2 {}.",
        record.arrival_mode, record.pain_level, record.heart_rate, record.oxygen_saturation
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::InMemoryHistory;
    use crate::models::{DecisionSource, TrendLabel};
    use crate::pipeline::narrative::MockLlmClient;
    use crate::riskmodel::{ArrivalEncoder, DecisionTree, RiskForest, TreeNode};

    fn leaf(distribution: Vec<f64>) -> TreeNode {
        TreeNode {
            feature: None,
            threshold: None,
            left: None,
            right: None,
            distribution,
        }
    }

    fn test_forest() -> RiskForest {
        RiskForest {
            n_classes: 4,
            n_features: 9,
            trees: vec![DecisionTree {
                nodes: vec![
                    TreeNode {
                        feature: Some(3),
                        threshold: Some(92.5),
                        left: Some(1),
                        right: Some(2),
                        distribution: vec![0.4, 0.1, 0.15, 0.35],
                    },
                    leaf(vec![0.0, 0.0, 0.2, 0.8]),
                    leaf(vec![0.7, 0.2, 0.1, 0.0]),
                ],
            }],
        }
    }

    fn test_processor(llm_response: &str) -> TriageProcessor {
        let engine = TriageEngine::new(
            Box::new(test_forest()),
            ArrivalEncoder::fitted(&["ambulance", "walk_in", "wheelchair"]),
        )
        .unwrap();
        let bridge =
            NarrativeBridge::new(Box::new(MockLlmClient::new(llm_response)), "test-model");
        TriageProcessor::new(
            engine,
            bridge,
            Box::new(InMemoryHistory::new()),
            ActiveFeatures::all(),
        )
    }

    #[test]
    fn full_pipeline_from_document_text() {
        let processor = test_processor("Hypoxic patient. ||| Oxygen now ||| Pulmonology");
        let entry = processor
            .process_text("P-101", "72 year old, SpO2: 85, temp of 101.2, HR 118")
            .unwrap();

        // SpO2 85 trips the hypoxia safety rule.
        assert_eq!(entry.decision.level, 3);
        assert_eq!(entry.decision.source, DecisionSource::Rule);
        assert_eq!(entry.decision.department, "Pulmonology / Respiratory");
        assert_eq!(entry.narrative.recommended_action, "Oxygen now");
        assert!(!entry.factors.is_empty());
        assert_eq!(entry.trend.label, TrendLabel::Stable);
        assert_eq!(entry.record.oxygen_saturation, 85);
    }

    #[test]
    fn unreadable_document_still_triages_on_defaults() {
        let processor = test_processor("Stable. ||| Routine checks ||| General Medicine");
        let entry = processor
            .process_text("P-102", "~~totally garbled~~")
            .unwrap();

        assert_eq!(entry.record, FeatureRecord::default());
        assert_eq!(entry.decision.source, DecisionSource::Model);
        assert_eq!(entry.decision.level, 0);
    }

    #[test]
    fn second_encounter_computes_deltas() {
        let processor = test_processor("S ||| A ||| D");
        processor
            .process_text("P-103", "SpO2: 98, temperature 37.0")
            .unwrap();
        let entry = processor
            .process_text("P-103", "SpO2: 94, temperature 38.4")
            .unwrap();

        assert_eq!(entry.trend.spo2_delta, Some(-4));
        assert_eq!(entry.trend.temperature_delta, Some(1.4));
        assert_eq!(entry.trend.label, TrendLabel::Worsening);
    }

    #[test]
    fn batch_isolates_per_patient_failures() {
        let engine = TriageEngine::new(
            Box::new(test_forest()),
            // walk_in missing from the fitted encoder — the model path
            // fails at encode time for every default record.
            ArrivalEncoder::fitted(&["ambulance"]),
        )
        .unwrap();
        let bridge = NarrativeBridge::new(Box::new(MockLlmClient::new("S ||| A ||| D")), "m");
        let processor = TriageProcessor::new(
            engine,
            bridge,
            Box::new(InMemoryHistory::new()),
            ActiveFeatures::all(),
        );

        let docs = vec![
            ("P-1".to_string(), "SpO2: 97".to_string()),
            ("P-2".to_string(), "SpO2: 96".to_string()),
        ];
        let results = processor.process_batch(&docs);

        // Both fail independently; the batch itself completes.
        assert_eq!(results.len(), 2);
        assert!(results[0].1.is_err());
        assert!(results[1].1.is_err());
        assert_eq!(results[0].0, "P-1");
        assert_eq!(results[1].0, "P-2");
    }

    #[test]
    fn manual_intake_synthesizes_a_note() {
        let note = intake_note(&FeatureRecord::default());
        assert_eq!(
            note,
            "Patient arrived via walk_in complaining of 5/10 pain. Vitals: HR 80, SpO2 98."
        );
    }

    #[test]
    fn manual_intake_record_reaches_the_board() {
        let processor = test_processor("S ||| A ||| D");
        let record = FeatureRecord {
            oxygen_saturation: 95,
            pain_level: 9,
            ..FeatureRecord::default()
        };
        let entry = processor.process_record("P-M1", record, None).unwrap();
        assert_eq!(entry.decision.department, "Emergency / Trauma");
        assert_eq!(entry.narrative.synthesis, "S");
    }

    #[test]
    fn third_encounter_compares_against_the_second() {
        let processor = test_processor("S ||| A ||| D");
        processor.process_text("P-1", "SpO2: 95").unwrap();
        processor.process_text("P-1", "SpO2: 93").unwrap();
        let entry = processor.process_text("P-1", "SpO2: 96").unwrap();
        assert_eq!(entry.trend.spo2_delta, Some(3));
        assert_eq!(entry.trend.label, TrendLabel::Stable);
    }

    #[test]
    fn narrative_failure_does_not_fail_the_patient() {
        use crate::pipeline::narrative::{FailingLlmClient, FailureKind};

        let engine = TriageEngine::new(
            Box::new(test_forest()),
            ArrivalEncoder::fitted(&["ambulance", "walk_in", "wheelchair"]),
        )
        .unwrap();
        let bridge = NarrativeBridge::new(
            Box::new(FailingLlmClient::new(FailureKind::Connection)),
            "m",
        );
        let processor = TriageProcessor::new(
            engine,
            bridge,
            Box::new(InMemoryHistory::new()),
            ActiveFeatures::all(),
        );

        let entry = processor.process_text("P-1", "SpO2: 85").unwrap();
        assert_eq!(entry.decision.level, 3);
        assert_eq!(entry.narrative.department_routing, "Offline");
    }
}
