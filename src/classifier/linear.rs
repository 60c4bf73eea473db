use anyhow::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Logistic scorer with randomly drawn weights.
///
/// Stand-in for a trained model: its output is deterministic for a given
/// artifact but means nothing about forgery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderModel {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl PlaceholderModel {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: usize) -> Self {
        let weights = (0..width).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let bias = rng.gen_range(-0.5..0.5);
        Self { weights, bias }
    }

    pub fn predict(&self, scaled: &[f64]) -> Result<f64> {
        if scaled.len() != self.weights.len() {
            anyhow::bail!(
                "model expects {} features, got {}",
                self.weights.len(),
                scaled.len()
            );
        }
        let z: f64 = self
            .weights
            .iter()
            .zip(scaled)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;
        Ok(sigmoid(z))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
