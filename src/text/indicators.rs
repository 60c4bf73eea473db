use std::sync::LazyLock;

use regex::Regex;

use crate::core::model::TextIndicators;

const MEDICAL_TERMS: [&str; 5] = ["diagnosis", "treatment", "prescription", "doctor", "hospital"];

// Pattern existence only; no calendar validation.
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}[-/]\d{1,2}[-/]\d{2,4}").expect("valid date regex"));

static CREDENTIAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"dr\.|md|mbbs").expect("valid credential regex"));

static HOSPITAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"hospital|clinic|medical center").expect("valid hospital regex"));

/// Scan extracted text for the four medical-record indicators.
///
/// Total: empty or garbage text yields all-false indicators.
pub fn analyze_text(text: &str) -> TextIndicators {
    let lowered = text.to_lowercase();

    TextIndicators {
        has_medical_terms: MEDICAL_TERMS.iter().any(|term| lowered.contains(term)),
        has_valid_dates: DATE_PATTERN.is_match(text),
        has_doctor_credentials: CREDENTIAL_PATTERN.is_match(&lowered),
        has_hospital_info: HOSPITAL_PATTERN.is_match(&lowered),
        text_length: text.chars().count(),
        suspicious_patterns: Vec::new(),
    }
}
