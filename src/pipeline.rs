use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{TimeDelta, Utc};
use tracing::{debug, warn};

use crate::classifier::{ModelStore, ProbabilitySource};
use crate::core::model::{AnalysisOutcome, AnalysisResult};
use crate::decision::{DecisionEngine, WeightedDecisionEngine};
use crate::error::VerifyError;
use crate::export::{prune_records, AnalysisRecord, Exporter, JsonExporter};
use crate::features::extract_image_features;
use crate::ocr::{RegionTextExtractor, TextExtractor};
use crate::text::analyze_text;

pub const MODELS_DIR_NAME: &str = "models";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub models_dir: PathBuf,
    pub save_dir: Option<PathBuf>,
    /// Saved records older than this are deleted after each save.
    pub retention: Option<TimeDelta>,
}

impl PipelineConfig {
    pub fn new(models_dir: PathBuf) -> Self {
        Self {
            models_dir,
            save_dir: None,
            retention: None,
        }
    }

    pub fn with_save_dir(mut self, save_dir: Option<PathBuf>) -> Self {
        self.save_dir = save_dir;
        self
    }

    pub fn with_retention(mut self, retention: Option<TimeDelta>) -> Self {
        self.retention = retention;
        self
    }
}

/// `models/` next to the running executable, falling back to the working
/// directory when the executable path is unavailable.
pub fn default_models_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(MODELS_DIR_NAME)
}

/// One analysis service: a read-only probability source plus the
/// stateless stages around it. Each call to [`analyze_document`] is
/// independent.
///
/// [`analyze_document`]: ForgeryDetector::analyze_document
pub struct ForgeryDetector {
    source: Box<dyn ProbabilitySource>,
    extractor: Box<dyn TextExtractor>,
    engine: Box<dyn DecisionEngine>,
    exporter: Option<JsonExporter>,
    retention: Option<TimeDelta>,
}

impl ForgeryDetector {
    pub fn new(
        source: Box<dyn ProbabilitySource>,
        extractor: Box<dyn TextExtractor>,
        engine: Box<dyn DecisionEngine>,
    ) -> Self {
        Self {
            source,
            extractor,
            engine,
            exporter: None,
            retention: None,
        }
    }

    /// Load (or bootstrap) the model artifacts named by `config` and wire
    /// the default stages.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let store = ModelStore::new(config.models_dir.clone());
        let model = store
            .load_or_bootstrap()
            .with_context(|| format!("failed to prepare model in {}", config.models_dir.display()))?;

        let detector = Self::new(
            Box::new(model),
            Box::new(RegionTextExtractor::new()),
            Box::new(WeightedDecisionEngine::new()),
        );
        Ok(detector
            .with_exporter(config.save_dir.clone().map(JsonExporter::new))
            .with_retention(config.retention))
    }

    pub fn with_exporter(mut self, exporter: Option<JsonExporter>) -> Self {
        self.exporter = exporter;
        self
    }

    pub fn with_retention(mut self, retention: Option<TimeDelta>) -> Self {
        self.retention = retention;
        self
    }

    /// Analyze one document image. Never fails: pipeline errors come back
    /// as [`AnalysisOutcome::Failed`].
    pub fn analyze_document(&self, image_path: &Path) -> AnalysisOutcome {
        match self.run(image_path) {
            Ok(result) => {
                self.save(image_path, &result);
                AnalysisOutcome::Completed(result)
            }
            Err(err) => {
                let err = VerifyError::from(err);
                warn!("analysis of {} failed: {err}", image_path.display());
                AnalysisOutcome::Failed(err.to_payload())
            }
        }
    }

    fn run(&self, image_path: &Path) -> Result<AnalysisResult> {
        let features = extract_image_features(image_path);
        if features.is_degraded() {
            debug!("image features degraded to zeros");
        }

        let forgery_probability = self.source.predict_probability(&features)?;
        debug!(forgery_probability, "model prediction");

        let text = self
            .extractor
            .extract_text(image_path)
            .context("failed to extract text")?;
        let indicators = analyze_text(&text);

        Ok(self.engine.decide(forgery_probability, indicators))
    }

    fn save(&self, image_path: &Path, result: &AnalysisResult) {
        let Some(exporter) = &self.exporter else {
            return;
        };
        let record = AnalysisRecord::new(image_path, result.clone(), Utc::now());
        match exporter.export(&record) {
            Ok(path) => debug!("saved analysis record to {}", path.display()),
            Err(err) => warn!("could not save analysis record: {err:#}"),
        }

        let Some(retention) = self.retention else {
            return;
        };
        match prune_records(exporter.out_dir(), retention) {
            Ok(0) => {}
            Ok(removed) => debug!(removed, "pruned expired analysis records"),
            Err(err) => warn!("could not prune analysis records: {err:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{FeatureVector, RiskLevel};
    use pretty_assertions::assert_eq;

    struct FixedSource(f64);

    impl ProbabilitySource for FixedSource {
        fn predict_probability(&self, _features: &FeatureVector) -> Result<f64> {
            Ok(self.0)
        }
    }

    struct FailingSource;

    impl ProbabilitySource for FailingSource {
        fn predict_probability(&self, _features: &FeatureVector) -> Result<f64> {
            anyhow::bail!("model exploded")
        }
    }

    struct FixedText(&'static str);

    impl TextExtractor for FixedText {
        fn extract_text(&self, _image_path: &Path) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn detector(source: Box<dyn ProbabilitySource>, text: &'static str) -> ForgeryDetector {
        ForgeryDetector::new(
            source,
            Box::new(FixedText(text)),
            Box::new(WeightedDecisionEngine::new()),
        )
    }

    #[test]
    fn injected_stages_drive_the_result() {
        let d = detector(
            Box::new(FixedSource(0.1)),
            "General Hospital, Dr. Smith MD, diagnosis on 01/02/2023",
        );
        let outcome = d.analyze_document(Path::new("/nonexistent/record.png"));
        let result = outcome.result().expect("completed");
        assert_eq!(result.text_analysis.present_count(), 4);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(!result.is_authentic);
    }

    #[test]
    fn prediction_failure_becomes_payload() {
        let d = detector(Box::new(FailingSource), "");
        let outcome = d.analyze_document(Path::new("/nonexistent/record.png"));
        match outcome {
            AnalysisOutcome::Failed(payload) => {
                assert_eq!(payload.status, "failed");
                assert_eq!(payload.error, "model exploded");
            }
            AnalysisOutcome::Completed(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn default_models_dir_ends_with_models() {
        assert!(default_models_dir().ends_with(MODELS_DIR_NAME));
    }
}
