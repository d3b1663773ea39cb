//! Longitudinal trend tracking between consecutive encounters.

use crate::models::{FeatureRecord, TrendLabel, TrendRecord};

/// Compare the latest record against the immediately preceding one.
///
/// The trend flag is asymmetric: only a saturation drop or a
/// temperature rise marks the patient as worsening, evaluated on raw
/// unrounded values. Heart rate is reported but never drives the flag.
pub fn compute_trend(current: &FeatureRecord, prior: Option<&FeatureRecord>) -> TrendRecord {
    let Some(prior) = prior else {
        return TrendRecord::baseline();
    };

    let worsening = current.oxygen_saturation < prior.oxygen_saturation
        || current.body_temperature > prior.body_temperature;

    TrendRecord {
        spo2_delta: Some(current.oxygen_saturation as i32 - prior.oxygen_saturation as i32),
        temperature_delta: Some(round1(current.body_temperature - prior.body_temperature)),
        heart_rate_delta: Some(current.heart_rate as i32 - prior.heart_rate as i32),
        label: if worsening {
            TrendLabel::Worsening
        } else {
            TrendLabel::Stable
        },
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(spo2: u32, temp: f64, hr: u32) -> FeatureRecord {
        FeatureRecord {
            oxygen_saturation: spo2,
            body_temperature: temp,
            heart_rate: hr,
            ..FeatureRecord::default()
        }
    }

    #[test]
    fn first_encounter_is_stable_with_no_deltas() {
        let trend = compute_trend(&record(94, 37.0, 80), None);
        assert_eq!(trend, TrendRecord::baseline());
    }

    #[test]
    fn saturation_drop_is_worsening() {
        let trend = compute_trend(&record(94, 37.0, 80), Some(&record(98, 37.0, 80)));
        assert_eq!(trend.label, TrendLabel::Worsening);
        assert_eq!(trend.spo2_delta, Some(-4));
    }

    #[test]
    fn temperature_rise_is_worsening() {
        let trend = compute_trend(&record(98, 38.2, 80), Some(&record(98, 37.5, 80)));
        assert_eq!(trend.label, TrendLabel::Worsening);
        assert_eq!(trend.temperature_delta, Some(0.7));
    }

    #[test]
    fn heart_rate_alone_never_flags_worsening() {
        let trend = compute_trend(&record(98, 37.0, 140), Some(&record(98, 37.0, 80)));
        assert_eq!(trend.label, TrendLabel::Stable);
        assert_eq!(trend.heart_rate_delta, Some(60));
    }

    #[test]
    fn recovery_is_stable() {
        let trend = compute_trend(&record(97, 36.8, 75), Some(&record(92, 39.0, 110)));
        assert_eq!(trend.label, TrendLabel::Stable);
        assert_eq!(trend.spo2_delta, Some(5));
        assert_eq!(trend.temperature_delta, Some(-2.2));
        assert_eq!(trend.heart_rate_delta, Some(-35));
    }

    #[test]
    fn temperature_delta_is_rounded_to_one_decimal() {
        let trend = compute_trend(&record(98, 38.75, 80), Some(&record(98, 37.5, 80)));
        // 1.25 rounds to 1.3 in the reported delta; the flag itself was
        // decided on the raw values.
        assert_eq!(trend.temperature_delta, Some(1.3));
        assert_eq!(trend.label, TrendLabel::Worsening);
    }
}
