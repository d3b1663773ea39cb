use serde::{Deserialize, Serialize};

/// Directional change in a patient's condition between consecutive
/// encounters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLabel {
    Stable,
    Worsening,
}

impl TrendLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            TrendLabel::Stable => "stable",
            TrendLabel::Worsening => "worsening",
        }
    }
}

/// Vital-sign deltas between the latest record and the immediately
/// preceding one. Deltas are `None` until a prior record exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    /// Signed SpO2 change in percentage points, unrounded.
    pub spo2_delta: Option<i32>,
    /// Signed temperature change in °C, rounded to 1 decimal.
    pub temperature_delta: Option<f64>,
    /// Signed heart-rate change in bpm, informational only — it never
    /// drives the trend label.
    pub heart_rate_delta: Option<i32>,
    pub label: TrendLabel,
}

impl TrendRecord {
    /// Stable trend with no deltas — the first encounter for a patient.
    pub fn baseline() -> Self {
        Self {
            spo2_delta: None,
            temperature_delta: None,
            heart_rate_delta: None,
            label: TrendLabel::Stable,
        }
    }

    pub fn is_worsening(&self) -> bool {
        self.label == TrendLabel::Worsening
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_has_no_deltas_and_is_stable() {
        let trend = TrendRecord::baseline();
        assert!(trend.spo2_delta.is_none());
        assert!(trend.temperature_delta.is_none());
        assert!(trend.heart_rate_delta.is_none());
        assert_eq!(trend.label, TrendLabel::Stable);
        assert!(!trend.is_worsening());
    }

    #[test]
    fn label_as_str() {
        assert_eq!(TrendLabel::Stable.as_str(), "stable");
        assert_eq!(TrendLabel::Worsening.as_str(), "worsening");
    }
}
