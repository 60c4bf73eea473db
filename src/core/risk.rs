use crate::core::model::{ReviewStatus, RiskLevel};

pub const LOW_RISK_CEILING: f64 = 0.3;
pub const HIGH_RISK_FLOOR: f64 = 0.7;

pub const AUTHENTIC_ANOMALY_CEILING: f64 = 0.5;
pub const AUTHENTIC_CONFIDENCE_FLOOR: f64 = 0.7;

pub fn classify_risk(anomaly_score: f64) -> RiskLevel {
    if anomaly_score < LOW_RISK_CEILING {
        RiskLevel::Low
    } else if anomaly_score < HIGH_RISK_FLOOR {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Both conditions are required: a low anomaly score alone is not enough.
pub fn is_authentic(anomaly_score: f64, confidence_score: f64) -> bool {
    anomaly_score < AUTHENTIC_ANOMALY_CEILING && confidence_score > AUTHENTIC_CONFIDENCE_FLOOR
}

pub fn review_status(anomaly_score: f64) -> ReviewStatus {
    if anomaly_score > 0.8 {
        ReviewStatus::HighRisk
    } else if anomaly_score > 0.5 {
        ReviewStatus::MediumRisk
    } else if anomaly_score > 0.3 {
        ReviewStatus::LowRisk
    } else {
        ReviewStatus::Safe
    }
}
