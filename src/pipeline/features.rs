//! Feature completion — merge a partial extraction with the defaults.
//!
//! The classifier requires every column present. Completion starts from
//! the baseline patient and overrides a default only when the feature is
//! both on the caller's active allow-list AND present in the partial
//! record. Total: it can never fail.

use std::collections::HashSet;

use crate::models::{ExtractedVitals, Feature, FeatureRecord};

/// Externally supplied set of "active" risk features. Inactive features
/// keep their default value and are excluded from attribution ranking.
#[derive(Debug, Clone)]
pub struct ActiveFeatures(HashSet<Feature>);

impl ActiveFeatures {
    pub fn new<I: IntoIterator<Item = Feature>>(features: I) -> Self {
        Self(features.into_iter().collect())
    }

    /// Every model feature active.
    pub fn all() -> Self {
        Self::new(Feature::ORDER)
    }

    /// The reference configuration's default panel.
    pub fn default_panel() -> Self {
        Self::new([
            Feature::Age,
            Feature::BodyTemperature,
            Feature::OxygenSaturation,
            Feature::HeartRate,
            Feature::PainLevel,
            Feature::ChronicDiseaseCount,
        ])
    }

    /// Parse a comma-separated feature-name list; unknown names are
    /// skipped with a warning.
    pub fn parse(csv: &str) -> Self {
        let mut set = HashSet::new();
        for name in csv.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match Feature::from_str(name) {
                Some(feature) => {
                    set.insert(feature);
                }
                None => tracing::warn!(feature = name, "Unknown feature name ignored"),
            }
        }
        Self(set)
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.0.contains(&feature)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ActiveFeatures {
    fn default() -> Self {
        Self::default_panel()
    }
}

/// Produce a complete, model-ready record from a partial extraction.
pub fn complete(partial: &ExtractedVitals, active: &ActiveFeatures) -> FeatureRecord {
    let mut record = FeatureRecord::default();
    for feature in Feature::ORDER {
        if !active.contains(feature) {
            continue;
        }
        match feature {
            Feature::Age => {
                if let Some(v) = partial.age {
                    record.age = v;
                }
            }
            Feature::HeartRate => {
                if let Some(v) = partial.heart_rate {
                    record.heart_rate = v;
                }
            }
            Feature::SystolicBloodPressure => {
                if let Some(v) = partial.systolic_blood_pressure {
                    record.systolic_blood_pressure = v;
                }
            }
            Feature::OxygenSaturation => {
                if let Some(v) = partial.oxygen_saturation {
                    record.oxygen_saturation = v;
                }
            }
            Feature::BodyTemperature => {
                if let Some(v) = partial.body_temperature {
                    record.body_temperature = v;
                }
            }
            Feature::PainLevel => {
                if let Some(v) = partial.pain_level {
                    record.pain_level = v;
                }
            }
            Feature::ChronicDiseaseCount => {
                if let Some(v) = partial.chronic_disease_count {
                    record.chronic_disease_count = v;
                }
            }
            Feature::PreviousErVisits => {
                if let Some(v) = partial.previous_er_visits {
                    record.previous_er_visits = v;
                }
            }
            Feature::ArrivalMode => {
                if let Some(v) = partial.arrival_mode {
                    record.arrival_mode = v;
                }
            }
        }
    }
    record
}
