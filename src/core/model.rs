use serde::{Deserialize, Serialize};

/// Number of values in a [`FeatureVector`]: mean, standard deviation and
/// the first eight intensity histogram bins.
pub const FEATURE_COUNT: usize = 10;

/// Number of leading histogram bins carried into the feature vector.
pub const HISTOGRAM_FEATURE_BINS: usize = 8;

/// Fixed-layout image statistics fed to the probability source.
///
/// Layout: `[mean, std_dev, bin0, bin1, ..., bin7]`. The order must match
/// the order the probability source was calibrated on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Degraded-signal vector returned when the image cannot be decoded.
    pub fn zeros() -> Self {
        Self([0.0; FEATURE_COUNT])
    }

    pub fn from_stats(mean: f64, std_dev: f64, bins: [f64; HISTOGRAM_FEATURE_BINS]) -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        values[0] = mean;
        values[1] = std_dev;
        values[2..].copy_from_slice(&bins);
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn mean(&self) -> f64 {
        self.0[0]
    }

    pub fn std_dev(&self) -> f64 {
        self.0[1]
    }

    pub fn histogram_bins(&self) -> &[f64] {
        &self.0[2..]
    }

    pub fn is_degraded(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }
}

/// Text-pattern heuristics derived from the extracted document text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextIndicators {
    pub has_medical_terms: bool,
    pub has_valid_dates: bool,
    pub has_doctor_credentials: bool,
    pub has_hospital_info: bool,
    pub text_length: usize,
    /// Reserved; nothing populates it yet.
    pub suspicious_patterns: Vec<String>,
}

impl TextIndicators {
    /// The four boolean indicators in reporting order.
    pub fn flags(&self) -> [bool; 4] {
        [
            self.has_medical_terms,
            self.has_valid_dates,
            self.has_doctor_credentials,
            self.has_hospital_info,
        ]
    }

    pub fn present_count(&self) -> usize {
        self.flags().iter().filter(|flag| **flag).count()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Triage bucket attached to saved analysis records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Safe,
    LowRisk,
    MediumRisk,
    HighRisk,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 4] = [
        ReviewStatus::Safe,
        ReviewStatus::LowRisk,
        ReviewStatus::MediumRisk,
        ReviewStatus::HighRisk,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub is_authentic: bool,
    pub forgery_probability: f64,
    pub text_analysis: TextIndicators,
    pub anomaly_score: f64,
    pub confidence_score: f64,
    pub risk_level: RiskLevel,
    pub recommendation: String,
    pub details: Vec<String>,
}

/// Two-field failure shape written to stdout in place of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
    pub status: String,
}

impl ErrorPayload {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            status: "failed".to_string(),
        }
    }
}

/// What one document analysis produces: a result or a structured failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Completed(AnalysisResult),
    Failed(ErrorPayload),
}

impl AnalysisOutcome {
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
