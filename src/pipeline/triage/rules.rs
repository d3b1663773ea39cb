//! Clinical safety rule layer.
//!
//! Hard thresholds that force a triage level regardless of what the
//! classifier says. Rules live in one ordered registry — an explicit
//! list of guard-predicate/outcome pairs, evaluated before the model —
//! so each rule stays auditable and independently testable. The first
//! matching rule short-circuits.

use crate::models::FeatureRecord;

/// A deterministic triage override.
#[derive(Clone, Copy)]
pub struct SafetyRule {
    /// Unique identifier for audit trail.
    pub id: &'static str,
    /// Forced triage level when the rule fires.
    pub level: u8,
    /// Clinician-facing reason attached to the decision.
    pub reason: &'static str,
    condition: fn(&FeatureRecord) -> bool,
}

impl SafetyRule {
    pub fn fires(&self, record: &FeatureRecord) -> bool {
        (self.condition)(record)
    }
}

impl std::fmt::Debug for SafetyRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafetyRule")
            .field("id", &self.id)
            .field("level", &self.level)
            .field("reason", &self.reason)
            .finish()
    }
}

/// The rule registry, in priority order.
pub fn safety_rules() -> Vec<SafetyRule> {
    vec![
        // TRI-001: hypoxia forces critical regardless of the model.
        SafetyRule {
            id: "TRI-001",
            level: 3,
            reason: "CRITICAL: Low Oxygen Saturation",
            condition: |r| r.oxygen_saturation < 90,
        },
        // TRI-002: hypertensive crisis forces critical.
        SafetyRule {
            id: "TRI-002",
            level: 3,
            reason: "CRITICAL: Severe Hypertension",
            condition: |r| r.systolic_blood_pressure > 190,
        },
    ]
}

/// First rule that fires for this record, if any.
pub fn first_matching(record: &FeatureRecord) -> Option<SafetyRule> {
    safety_rules().into_iter().find(|rule| rule.fires(record))
}
