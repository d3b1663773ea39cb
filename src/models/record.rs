use serde::{Deserialize, Serialize};

use super::feature::{ArrivalMode, Feature};
use crate::riskmodel::{ArrivalEncoder, ModelError};

/// Partial feature record produced by free-text extraction.
///
/// Every field is optional — an extraction miss simply leaves the field
/// `None` and feature completion substitutes the default. The original
/// document text rides along unmodified for narrative synthesis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedVitals {
    pub age: Option<u32>,
    pub heart_rate: Option<u32>,
    pub systolic_blood_pressure: Option<u32>,
    pub oxygen_saturation: Option<u32>,
    pub body_temperature: Option<f64>,
    pub pain_level: Option<u32>,
    pub chronic_disease_count: Option<u32>,
    pub previous_er_visits: Option<u32>,
    pub arrival_mode: Option<ArrivalMode>,
    pub raw_text: String,
}

impl ExtractedVitals {
    /// True if no vital was recognized at all.
    pub fn is_empty(&self) -> bool {
        self.age.is_none()
            && self.heart_rate.is_none()
            && self.systolic_blood_pressure.is_none()
            && self.oxygen_saturation.is_none()
            && self.body_temperature.is_none()
            && self.pain_level.is_none()
            && self.chronic_disease_count.is_none()
            && self.previous_er_visits.is_none()
            && self.arrival_mode.is_none()
    }
}

/// Complete, model-ready feature record. Immutable once produced —
/// components copy it, never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub age: u32,
    pub heart_rate: u32,
    pub systolic_blood_pressure: u32,
    pub oxygen_saturation: u32,
    pub body_temperature: f64,
    pub pain_level: u32,
    pub chronic_disease_count: u32,
    pub previous_er_visits: u32,
    pub arrival_mode: ArrivalMode,
}

impl Default for FeatureRecord {
    /// The baseline patient used when a feature is inactive or missing.
    fn default() -> Self {
        Self {
            age: 45,
            heart_rate: 80,
            systolic_blood_pressure: 120,
            oxygen_saturation: 98,
            body_temperature: 37.0,
            pain_level: 5,
            chronic_disease_count: 0,
            previous_er_visits: 0,
            arrival_mode: ArrivalMode::WalkIn,
        }
    }
}

impl FeatureRecord {
    /// Observed value of a single feature, for display and attribution.
    pub fn value(&self, feature: Feature) -> FeatureValue {
        match feature {
            Feature::Age => FeatureValue::Int(self.age),
            Feature::HeartRate => FeatureValue::Int(self.heart_rate),
            Feature::SystolicBloodPressure => FeatureValue::Int(self.systolic_blood_pressure),
            Feature::OxygenSaturation => FeatureValue::Int(self.oxygen_saturation),
            Feature::BodyTemperature => FeatureValue::Float(self.body_temperature),
            Feature::PainLevel => FeatureValue::Int(self.pain_level),
            Feature::ChronicDiseaseCount => FeatureValue::Int(self.chronic_disease_count),
            Feature::PreviousErVisits => FeatureValue::Int(self.previous_er_visits),
            Feature::ArrivalMode => FeatureValue::Categorical(self.arrival_mode),
        }
    }

    /// Encode the record as the model's ordered input vector.
    ///
    /// Fails only when the fitted encoder does not know the arrival mode —
    /// that error propagates to the caller with no recovery.
    pub fn to_vector(&self, encoder: &ArrivalEncoder) -> Result<Vec<f64>, ModelError> {
        Ok(vec![
            self.age as f64,
            self.heart_rate as f64,
            self.systolic_blood_pressure as f64,
            self.oxygen_saturation as f64,
            self.body_temperature,
            self.pain_level as f64,
            self.chronic_disease_count as f64,
            self.previous_er_visits as f64,
            encoder.transform(self.arrival_mode.as_str())? as f64,
        ])
    }
}

/// A scalar or categorical feature value, kept in its native shape
/// for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Int(u32),
    Float(f64),
    Categorical(ArrivalMode),
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureValue::Int(v) => write!(f, "{v}"),
            FeatureValue::Float(v) => write!(f, "{v}"),
            FeatureValue::Categorical(m) => f.write_str(m.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riskmodel::ArrivalEncoder;

    #[test]
    fn default_record_is_the_baseline_patient() {
        let record = FeatureRecord::default();
        assert_eq!(record.age, 45);
        assert_eq!(record.heart_rate, 80);
        assert_eq!(record.systolic_blood_pressure, 120);
        assert_eq!(record.oxygen_saturation, 98);
        assert_eq!(record.body_temperature, 37.0);
        assert_eq!(record.pain_level, 5);
        assert_eq!(record.chronic_disease_count, 0);
        assert_eq!(record.previous_er_visits, 0);
        assert_eq!(record.arrival_mode, ArrivalMode::WalkIn);
    }

    #[test]
    fn to_vector_follows_column_order() {
        let encoder = ArrivalEncoder::fitted(&["ambulance", "walk_in", "wheelchair"]);
        let record = FeatureRecord {
            age: 70,
            heart_rate: 110,
            systolic_blood_pressure: 150,
            oxygen_saturation: 91,
            body_temperature: 38.5,
            pain_level: 7,
            chronic_disease_count: 2,
            previous_er_visits: 1,
            arrival_mode: ArrivalMode::Ambulance,
        };
        let vector = record.to_vector(&encoder).unwrap();
        assert_eq!(
            vector,
            vec![70.0, 110.0, 150.0, 91.0, 38.5, 7.0, 2.0, 1.0, 0.0]
        );
    }

    #[test]
    fn to_vector_fails_on_unseen_category() {
        // Encoder fitted without wheelchair — a wheelchair arrival is fatal.
        let encoder = ArrivalEncoder::fitted(&["ambulance", "walk_in"]);
        let record = FeatureRecord {
            arrival_mode: ArrivalMode::Wheelchair,
            ..FeatureRecord::default()
        };
        assert!(record.to_vector(&encoder).is_err());
    }

    #[test]
    fn empty_extraction_reports_empty() {
        let partial = ExtractedVitals::default();
        assert!(partial.is_empty());

        let partial = ExtractedVitals {
            heart_rate: Some(92),
            ..ExtractedVitals::default()
        };
        assert!(!partial.is_empty());
    }

    #[test]
    fn feature_value_displays_natively() {
        assert_eq!(FeatureValue::Int(88).to_string(), "88");
        assert_eq!(FeatureValue::Float(40.2).to_string(), "40.2");
        assert_eq!(
            FeatureValue::Categorical(ArrivalMode::WalkIn).to_string(),
            "walk_in"
        );
    }
}
