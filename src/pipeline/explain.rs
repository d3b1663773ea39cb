//! Per-feature attribution for one classification.
//!
//! Selects the attribution row for the class the model itself predicts
//! for the record (attributions are class-conditional), builds one
//! factor per active feature, and ranks by contribution magnitude.
//! Pure function of the record and the trained model state.

use crate::models::{AttributionFactor, Feature, FeatureRecord, PushDirection};
use crate::riskmodel::{ArrivalEncoder, ModelError, RiskModel};

use super::features::ActiveFeatures;

/// Factors retained after ranking.
pub const TOP_FACTORS: usize = 3;

/// Ranked attribution for one record, framed around the model's
/// predicted level. When a safety rule overrode the final decision the
/// factors still explain what the classifier saw.
#[derive(Debug, Clone)]
pub struct RankedAttribution {
    pub predicted_level: u8,
    pub factors: Vec<AttributionFactor>,
}

impl RankedAttribution {
    /// One-line "feature (direction)" summary for prompts and logs.
    pub fn driver_summary(&self) -> String {
        self.factors
            .iter()
            .map(|f| format!("{} ({})", f.feature, f.direction.label(self.predicted_level)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Rank the active features by their contribution to the predicted class.
///
/// Ranking is by descending absolute contribution, ties broken by the
/// fixed column order, truncated to [`TOP_FACTORS`].
pub fn explain(
    model: &dyn RiskModel,
    encoder: &ArrivalEncoder,
    record: &FeatureRecord,
    active: &ActiveFeatures,
) -> Result<RankedAttribution, ModelError> {
    let vector = record.to_vector(encoder)?;
    let predicted = model.predict(&vector);
    let attributions = model.attributions(&vector);
    let contributions = &attributions[predicted];

    let mut factors: Vec<AttributionFactor> = Feature::ORDER
        .iter()
        .enumerate()
        .filter(|(_, feature)| active.contains(**feature))
        .map(|(column, feature)| {
            let contribution = round3(contributions[column]);
            AttributionFactor {
                feature: *feature,
                value: record.value(*feature),
                contribution,
                direction: if contribution > 0.0 {
                    PushDirection::Toward
                } else {
                    PushDirection::Away
                },
            }
        })
        .collect();

    // Stable sort keeps column order for equal magnitudes.
    factors.sort_by(|a, b| {
        b.contribution
            .abs()
            .partial_cmp(&a.contribution.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    factors.truncate(TOP_FACTORS);

    Ok(RankedAttribution {
        predicted_level: predicted as u8,
        factors,
    })
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
