//! Per-patient encounter history.
//!
//! The pipeline never owns ambient mutable state: history is an
//! injected, interface-bound store. The bundled implementation is
//! session-scoped and in-memory — persistence across process restarts
//! is deliberately out of scope.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::FeatureRecord;

/// One processed encounter retained for longitudinal comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encounter {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub record: FeatureRecord,
    pub triage_level: u8,
}

impl Encounter {
    pub fn new(record: FeatureRecord, triage_level: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            record,
            triage_level,
        }
    }
}

/// Append-only per-patient history, read and written by the pipeline
/// through this seam so tests can substitute a fake.
pub trait HistoryStore {
    /// Most recent encounter for the patient, if any.
    fn latest(&self, patient_id: &str) -> Option<Encounter>;

    /// Append a new encounter to the patient's sequence.
    fn append(&self, patient_id: &str, encounter: Encounter);
}

/// Session-scoped in-memory store. Single writer per session; the lock
/// only guards against accidental cross-thread reuse.
#[derive(Default)]
pub struct InMemoryHistory {
    entries: Mutex<HashMap<String, Vec<Encounter>>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of encounters stored for one patient.
    pub fn encounter_count(&self, patient_id: &str) -> usize {
        self.entries
            .lock()
            .map(|m| m.get(patient_id).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

impl HistoryStore for InMemoryHistory {
    fn latest(&self, patient_id: &str) -> Option<Encounter> {
        self.entries
            .lock()
            .ok()?
            .get(patient_id)
            .and_then(|v| v.last())
            .cloned()
    }

    fn append(&self, patient_id: &str, encounter: Encounter) {
        if let Ok(mut entries) = self.entries.lock() {
            entries
                .entry(patient_id.to_string())
                .or_default()
                .push(encounter);
        }
    }
}
