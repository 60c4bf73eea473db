use crate::core::model::TextIndicators;

/// Weight of the probability source in the anomaly score.
pub const IMAGE_WEIGHT: f64 = 0.6;
/// Weight of missing text indicators in the anomaly score.
pub const TEXT_WEIGHT: f64 = 0.4;
/// Contribution of each present text indicator.
pub const INDICATOR_STEP: f64 = 0.25;

/// 0.25 per present indicator: one of 0, 0.25, 0.5, 0.75 or 1.0.
pub fn text_score(indicators: &TextIndicators) -> f64 {
    let mut score = 0.0;
    for present in indicators.flags() {
        if present {
            score += INDICATOR_STEP;
        }
    }
    score
}

pub fn anomaly_score(forgery_probability: f64, indicators: &TextIndicators) -> f64 {
    forgery_probability * IMAGE_WEIGHT + (1.0 - text_score(indicators)) * TEXT_WEIGHT
}

/// Mean of indicator coverage and model decisiveness.
///
/// Decisiveness is `1 - 2 * |0.5 - p|`, which is 1.0 at `p = 0.5` and 0.0
/// at either extreme.
pub fn confidence_score(forgery_probability: f64, indicators: &TextIndicators) -> f64 {
    let feature_confidence = indicators.present_count() as f64 / 4.0;
    let model_confidence = 1.0 - (0.5 - forgery_probability).abs() * 2.0;
    (feature_confidence + model_confidence) / 2.0
}
