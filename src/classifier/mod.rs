//! Probability source: maps a [`FeatureVector`] to a forgery probability.
//!
//! The only bundled implementation is a placeholder built from random
//! data. It carries no predictive signal; swap in a trained model through
//! [`ProbabilitySource`] without touching the decision logic.

pub mod linear;
pub mod scaler;
pub mod store;

use anyhow::{Context, Result};

use crate::core::model::FeatureVector;

pub use linear::PlaceholderModel;
pub use scaler::StandardScaler;
pub use store::ModelStore;

/// Read-only after construction, so one instance may serve parallel
/// analyses.
pub trait ProbabilitySource: Send + Sync {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64>;
}

/// Standardise features, then score them with the placeholder model.
#[derive(Debug, Clone)]
pub struct ScaledModel {
    pub scaler: StandardScaler,
    pub model: PlaceholderModel,
}

impl ScaledModel {
    pub fn new(scaler: StandardScaler, model: PlaceholderModel) -> Self {
        Self { scaler, model }
    }
}

impl ProbabilitySource for ScaledModel {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64> {
        let scaled = self
            .scaler
            .transform(features.as_slice())
            .context("failed to scale features")?;
        let probability = self.model.predict(&scaled)?;
        if !probability.is_finite() {
            anyhow::bail!("model produced a non-finite probability: {probability}");
        }
        Ok(probability.clamp(0.0, 1.0))
    }
}
