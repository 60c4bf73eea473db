use crate::core::model::TextIndicators;

pub const HIGH_MANIPULATION: &str = "High probability of image manipulation detected";
pub const SUSPICIOUS_PATTERNS: &str = "Some suspicious patterns found in the image";
pub const MISSING_MEDICAL_TERMS: &str = "Missing expected medical terminology";
pub const MISSING_DATES: &str = "No valid dates found in the document";
pub const MISSING_CREDENTIALS: &str = "Missing doctor credentials";
pub const MISSING_HOSPITAL_INFO: &str = "Missing hospital information";

/// Human-readable findings: at most one image note, then one line per
/// missing text indicator in reporting order.
pub fn analysis_details(indicators: &TextIndicators, forgery_probability: f64) -> Vec<String> {
    let mut details = Vec::new();

    if forgery_probability > 0.7 {
        details.push(HIGH_MANIPULATION.to_string());
    } else if forgery_probability > 0.4 {
        details.push(SUSPICIOUS_PATTERNS.to_string());
    }

    let missing = [
        (indicators.has_medical_terms, MISSING_MEDICAL_TERMS),
        (indicators.has_valid_dates, MISSING_DATES),
        (indicators.has_doctor_credentials, MISSING_CREDENTIALS),
        (indicators.has_hospital_info, MISSING_HOSPITAL_INFO),
    ];
    details.extend(
        missing
            .into_iter()
            .filter(|(present, _)| !present)
            .map(|(_, line)| line.to_string()),
    );

    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn image_notes_are_exclusive() {
        let full = TextIndicators {
            has_medical_terms: true,
            has_valid_dates: true,
            has_doctor_credentials: true,
            has_hospital_info: true,
            ..TextIndicators::default()
        };
        assert_eq!(analysis_details(&full, 0.9), vec![HIGH_MANIPULATION]);
        assert_eq!(analysis_details(&full, 0.7), vec![SUSPICIOUS_PATTERNS]);
        assert_eq!(analysis_details(&full, 0.4), Vec::<String>::new());
    }

    #[test]
    fn missing_indicators_keep_fixed_order() {
        let partial = TextIndicators {
            has_valid_dates: true,
            ..TextIndicators::default()
        };
        assert_eq!(
            analysis_details(&partial, 0.0),
            vec![MISSING_MEDICAL_TERMS, MISSING_CREDENTIALS, MISSING_HOSPITAL_INFO]
        );
        assert_eq!(
            analysis_details(&TextIndicators::default(), 0.5),
            vec![
                SUSPICIOUS_PATTERNS,
                MISSING_MEDICAL_TERMS,
                MISSING_DATES,
                MISSING_CREDENTIALS,
                MISSING_HOSPITAL_INFO,
            ]
        );
    }
}
