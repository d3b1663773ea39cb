use serde::{Deserialize, Serialize};

/// Number of discrete acuity classes (level 0 = stable … 3 = critical).
pub const TRIAGE_LEVELS: usize = 4;

/// Which stage produced the final triage level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    /// A deterministic safety rule fired and overrode the model.
    Rule,
    /// The learned classifier's prediction stood.
    Model,
}

impl std::fmt::Display for DecisionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionSource::Rule => f.write_str("Safety Rule"),
            DecisionSource::Model => f.write_str("ML Model"),
        }
    }
}

/// Final triage outcome for one encounter.
///
/// Invariant: when a safety rule fires, `source` is `Rule` and
/// `rule_reason` carries the rule's reason — the model's output is
/// discarded entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageDecision {
    /// Acuity level, 0 (stable) through 3 (critical).
    pub level: u8,
    /// Recommended department, from the deterministic routing tree.
    pub department: String,
    pub source: DecisionSource,
    pub rule_reason: Option<String>,
}
