//! Department routing.
//!
//! A small deterministic decision tree over the raw feature record,
//! independent of whether the level came from a rule or the model.
//! First matching condition wins.

use crate::models::FeatureRecord;

pub fn recommend_department(record: &FeatureRecord) -> &'static str {
    if record.oxygen_saturation < 92 {
        return "Pulmonology / Respiratory";
    }
    if record.heart_rate > 120 || record.systolic_blood_pressure > 160 {
        return "Cardiology";
    }
    if record.pain_level >= 8 {
        return "Emergency / Trauma";
    }
    "General Medicine"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_spo2_routes_to_pulmonology() {
        let record = FeatureRecord {
            oxygen_saturation: 91,
            heart_rate: 130,
            ..FeatureRecord::default()
        };
        // SpO2 is checked first even when cardiology would also match.
        assert_eq!(recommend_department(&record), "Pulmonology / Respiratory");
    }

    #[test]
    fn tachycardia_routes_to_cardiology() {
        let record = FeatureRecord {
            heart_rate: 125,
            ..FeatureRecord::default()
        };
        assert_eq!(recommend_department(&record), "Cardiology");
    }

    #[test]
    fn hypertension_routes_to_cardiology() {
        let record = FeatureRecord {
            systolic_blood_pressure: 165,
            ..FeatureRecord::default()
        };
        assert_eq!(recommend_department(&record), "Cardiology");
    }

    #[test]
    fn severe_pain_routes_to_trauma() {
        let record = FeatureRecord {
            pain_level: 8,
            ..FeatureRecord::default()
        };
        assert_eq!(recommend_department(&record), "Emergency / Trauma");
    }

    #[test]
    fn default_record_routes_to_general_medicine() {
        assert_eq!(
            recommend_department(&FeatureRecord::default()),
            "General Medicine"
        );
    }
}
