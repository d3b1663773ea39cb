//! Prioritized triage worklist.
//!
//! Assembled board entries, ordered for display: higher acuity first,
//! and within a level, deteriorating patients ahead of stable ones.
//! Session-scoped — the board is rebuilt per run and never persisted.

use serde::{Deserialize, Serialize};

use crate::models::{
    AttributionFactor, FeatureRecord, NarrativeResult, TrendRecord, TriageDecision,
};

/// Display band for a triage level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcuityBand {
    Critical,
    Urgent,
    Stable,
}

impl AcuityBand {
    pub fn from_level(level: u8) -> Self {
        match level {
            l if l >= 2 => AcuityBand::Critical,
            1 => AcuityBand::Urgent,
            _ => AcuityBand::Stable,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AcuityBand::Critical => "CRITICAL (Level 2/3)",
            AcuityBand::Urgent => "URGENT (Level 1)",
            AcuityBand::Stable => "STABLE (Level 0)",
        }
    }
}

/// A fully assembled worklist entry — always complete, never awaiting
/// a missing narrative or trend field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorklistEntry {
    pub patient_id: String,
    pub decision: TriageDecision,
    /// Top attribution factors, most influential first.
    pub factors: Vec<AttributionFactor>,
    /// Pre-rendered "feature (direction)" summary of the factors.
    pub driver_summary: String,
    pub narrative: NarrativeResult,
    pub trend: TrendRecord,
    pub record: FeatureRecord,
}

impl WorklistEntry {
    pub fn band(&self) -> AcuityBand {
        AcuityBand::from_level(self.decision.level)
    }

    /// Sort key: level first, then worsening ahead of stable.
    fn priority(&self) -> (u8, u8) {
        (
            self.decision.level,
            u8::from(self.trend.is_worsening()),
        )
    }
}

/// The live triage board.
#[derive(Default)]
pub struct TriageBoard {
    entries: Vec<WorklistEntry>,
}

impl TriageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any previous entry for the same patient.
    pub fn upsert(&mut self, entry: WorklistEntry) {
        self.entries.retain(|e| e.patient_id != entry.patient_id);
        self.entries.push(entry);
    }

    /// Entries in display order, most urgent first.
    pub fn prioritized(&self) -> Vec<&WorklistEntry> {
        let mut sorted: Vec<&WorklistEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.priority().cmp(&a.priority()));
        sorted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DecisionSource, TrendLabel};

    fn entry(patient_id: &str, level: u8, trend: TrendLabel) -> WorklistEntry {
        WorklistEntry {
            patient_id: patient_id.to_string(),
            decision: TriageDecision {
                level,
                department: "General Medicine".into(),
                source: DecisionSource::Model,
                rule_reason: None,
            },
            factors: vec![],
            driver_summary: String::new(),
            narrative: NarrativeResult {
                synthesis: "".into(),
                recommended_action: "".into(),
                department_routing: "".into(),
            },
            trend: TrendRecord {
                spo2_delta: None,
                temperature_delta: None,
                heart_rate_delta: None,
                label: trend,
            },
            record: FeatureRecord::default(),
        }
    }

    #[test]
    fn bands_follow_levels() {
        assert_eq!(AcuityBand::from_level(3), AcuityBand::Critical);
        assert_eq!(AcuityBand::from_level(2), AcuityBand::Critical);
        assert_eq!(AcuityBand::from_level(1), AcuityBand::Urgent);
        assert_eq!(AcuityBand::from_level(0), AcuityBand::Stable);
    }

    #[test]
    fn higher_levels_come_first() {
        let mut board = TriageBoard::new();
        board.upsert(entry("P-1", 0, TrendLabel::Stable));
        board.upsert(entry("P-2", 3, TrendLabel::Stable));
        board.upsert(entry("P-3", 1, TrendLabel::Stable));

        let order: Vec<&str> = board
            .prioritized()
            .iter()
            .map(|e| e.patient_id.as_str())
            .collect();
        assert_eq!(order, vec!["P-2", "P-3", "P-1"]);
    }

    #[test]
    fn worsening_outranks_stable_within_a_level() {
        let mut board = TriageBoard::new();
        board.upsert(entry("P-stable", 2, TrendLabel::Stable));
        board.upsert(entry("P-worse", 2, TrendLabel::Worsening));

        let order: Vec<&str> = board
            .prioritized()
            .iter()
            .map(|e| e.patient_id.as_str())
            .collect();
        assert_eq!(order, vec!["P-worse", "P-stable"]);
    }

    #[test]
    fn upsert_replaces_previous_entry_for_patient() {
        let mut board = TriageBoard::new();
        board.upsert(entry("P-1", 0, TrendLabel::Stable));
        board.upsert(entry("P-1", 3, TrendLabel::Worsening));

        assert_eq!(board.len(), 1);
        assert_eq!(board.prioritized()[0].decision.level, 3);
    }
}
