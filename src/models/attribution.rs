use serde::{Deserialize, Serialize};

use super::feature::Feature;
use super::record::FeatureValue;

/// Whether a feature's contribution pushed the record toward the
/// predicted class or pulled it away. Direction is always framed
/// relative to the winning class, never as an absolute good/bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PushDirection {
    Toward,
    Away,
}

impl PushDirection {
    pub fn label(self, level: u8) -> String {
        match self {
            PushDirection::Toward => format!("pushed toward Level {level}"),
            PushDirection::Away => format!("pulled away from Level {level}"),
        }
    }
}

/// One feature's contribution to the classifier's decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionFactor {
    pub feature: Feature,
    /// The observed value the contribution was computed for.
    pub value: FeatureValue,
    /// Signed contribution toward the predicted class, rounded to 3 decimals.
    pub contribution: f64,
    pub direction: PushDirection,
}
