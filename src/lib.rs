//! Screening of medical record images for signs of forgery.
//!
//! Image statistics go to a pluggable [`classifier::ProbabilitySource`],
//! extracted text goes through fixed pattern heuristics, and the decision
//! engine folds both into an [`AnalysisResult`].

pub mod classifier;
pub mod core;
pub mod decision;
pub mod error;
pub mod export;
pub mod features;
pub mod ocr;
pub mod pipeline;
pub mod text;

pub use crate::core::model::{
    AnalysisOutcome, AnalysisResult, ErrorPayload, FeatureVector, RiskLevel, TextIndicators,
};
pub use error::VerifyError;
pub use pipeline::{ForgeryDetector, PipelineConfig};
