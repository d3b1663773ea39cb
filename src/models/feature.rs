use serde::{Deserialize, Serialize};

/// A model feature. The variant order here IS the model's column order —
/// vectors handed to the classifier are built by iterating `Feature::ORDER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Age,
    HeartRate,
    SystolicBloodPressure,
    OxygenSaturation,
    BodyTemperature,
    PainLevel,
    ChronicDiseaseCount,
    PreviousErVisits,
    ArrivalMode,
}

impl Feature {
    /// Fixed column order used during offline training.
    pub const ORDER: [Feature; 9] = [
        Feature::Age,
        Feature::HeartRate,
        Feature::SystolicBloodPressure,
        Feature::OxygenSaturation,
        Feature::BodyTemperature,
        Feature::PainLevel,
        Feature::ChronicDiseaseCount,
        Feature::PreviousErVisits,
        Feature::ArrivalMode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Age => "age",
            Feature::HeartRate => "heart_rate",
            Feature::SystolicBloodPressure => "systolic_blood_pressure",
            Feature::OxygenSaturation => "oxygen_saturation",
            Feature::BodyTemperature => "body_temperature",
            Feature::PainLevel => "pain_level",
            Feature::ChronicDiseaseCount => "chronic_disease_count",
            Feature::PreviousErVisits => "previous_er_visits",
            Feature::ArrivalMode => "arrival_mode",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "age" => Some(Feature::Age),
            "heart_rate" => Some(Feature::HeartRate),
            "systolic_blood_pressure" => Some(Feature::SystolicBloodPressure),
            "oxygen_saturation" => Some(Feature::OxygenSaturation),
            "body_temperature" => Some(Feature::BodyTemperature),
            "pain_level" => Some(Feature::PainLevel),
            "chronic_disease_count" => Some(Feature::ChronicDiseaseCount),
            "previous_er_visits" => Some(Feature::PreviousErVisits),
            "arrival_mode" => Some(Feature::ArrivalMode),
            _ => None,
        }
    }

    /// Column index of this feature in the model's input vector.
    pub fn index(self) -> usize {
        Feature::ORDER
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the patient arrived at the facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalMode {
    WalkIn,
    Ambulance,
    Wheelchair,
}

impl ArrivalMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ArrivalMode::WalkIn => "walk_in",
            ArrivalMode::Ambulance => "ambulance",
            ArrivalMode::Wheelchair => "wheelchair",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "walk_in" => Some(ArrivalMode::WalkIn),
            "ambulance" => Some(ArrivalMode::Ambulance),
            "wheelchair" => Some(ArrivalMode::Wheelchair),
            _ => None,
        }
    }
}

impl std::fmt::Display for ArrivalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
