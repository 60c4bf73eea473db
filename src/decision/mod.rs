pub mod details;
pub mod recommend;

use crate::core::model::{AnalysisResult, TextIndicators};
use crate::core::risk::{classify_risk, is_authentic};
use crate::core::scoring::{anomaly_score, confidence_score};

/// Turns a forgery probability and text indicators into a verdict.
pub trait DecisionEngine: Send + Sync {
    fn decide(&self, forgery_probability: f64, indicators: TextIndicators) -> AnalysisResult;
}

/// Fixed-weight combination of the image and text signals.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeightedDecisionEngine;

impl WeightedDecisionEngine {
    pub fn new() -> Self {
        Self
    }
}

impl DecisionEngine for WeightedDecisionEngine {
    fn decide(&self, forgery_probability: f64, indicators: TextIndicators) -> AnalysisResult {
        let anomaly = anomaly_score(forgery_probability, &indicators);
        let confidence = confidence_score(forgery_probability, &indicators);

        AnalysisResult {
            is_authentic: is_authentic(anomaly, confidence),
            forgery_probability,
            anomaly_score: anomaly,
            confidence_score: confidence,
            risk_level: classify_risk(anomaly),
            recommendation: recommend::recommendation(anomaly, confidence).to_string(),
            details: details::analysis_details(&indicators, forgery_probability),
            text_analysis: indicators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::RiskLevel;
    use pretty_assertions::assert_eq;

    fn all_present() -> TextIndicators {
        TextIndicators {
            has_medical_terms: true,
            has_valid_dates: true,
            has_doctor_credentials: true,
            has_hospital_info: true,
            text_length: 64,
            suspicious_patterns: Vec::new(),
        }
    }

    #[test]
    fn low_anomaly_without_confidence_is_not_authentic() {
        let result = WeightedDecisionEngine::new().decide(0.1, all_present());
        assert!((result.anomaly_score - 0.06).abs() < 1e-9);
        assert!((result.confidence_score - 0.6).abs() < 1e-9);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(!result.is_authentic);
        assert_eq!(result.recommendation, recommend::ADDITIONAL_VERIFICATION);
        assert!(result.details.is_empty());
    }

    #[test]
    fn undecided_model_with_full_text_is_authentic() {
        let result = WeightedDecisionEngine::new().decide(0.45, all_present());
        // anomaly 0.27, confidence (1.0 + 0.9) / 2
        assert!((result.anomaly_score - 0.27).abs() < 1e-9);
        assert!((result.confidence_score - 0.95).abs() < 1e-9);
        assert!(result.is_authentic);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.recommendation, recommend::APPEARS_AUTHENTIC);
        assert_eq!(result.details, vec![details::SUSPICIOUS_PATTERNS.to_string()]);
    }

    #[test]
    fn no_text_and_confident_forgery_is_high_risk() {
        let result = WeightedDecisionEngine::new().decide(0.95, TextIndicators::default());
        assert_eq!(result.risk_level, RiskLevel::High);
        assert!(!result.is_authentic);
        assert_eq!(result.recommendation, recommend::HIGH_RISK);
        assert_eq!(result.details.len(), 5);
        assert_eq!(result.details[0], details::HIGH_MANIPULATION);
    }
}
