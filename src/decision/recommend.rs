pub const APPEARS_AUTHENTIC: &str = "Document appears authentic. No further verification needed.";
pub const HIGH_RISK: &str = "High risk of forgery. Recommend thorough manual verification.";
pub const ADDITIONAL_VERIFICATION: &str =
    "Some anomalies detected. Recommend additional verification steps.";

/// The conditions overlap and leave gaps; everything not caught by the
/// first two arms falls through to the middle message.
pub fn recommendation(anomaly_score: f64, confidence_score: f64) -> &'static str {
    if anomaly_score < 0.3 && confidence_score > 0.7 {
        APPEARS_AUTHENTIC
    } else if anomaly_score > 0.7 {
        HIGH_RISK
    } else {
        ADDITIONAL_VERIFICATION
    }
}
