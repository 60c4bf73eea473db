use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Per-feature standardisation: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }

    /// Fit on row-major samples. Zero-variance columns get a scale of 1.0.
    pub fn fit(samples: &[Vec<f64>]) -> Result<Self> {
        let Some(first) = samples.first() else {
            anyhow::bail!("cannot fit a scaler on zero samples");
        };
        let width = first.len();
        if let Some(bad) = samples.iter().find(|row| row.len() != width) {
            anyhow::bail!("inconsistent sample width: expected {width}, got {}", bad.len());
        }

        let n = samples.len() as f64;
        let mut mean = vec![0.0; width];
        for row in samples {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut scale = vec![0.0; width];
        for row in samples {
            for ((s, v), m) in scale.iter_mut().zip(row).zip(&mean) {
                *s += (v - m).powi(2);
            }
        }
        for s in scale.iter_mut() {
            let std = (*s / n).sqrt();
            *s = if std == 0.0 { 1.0 } else { std };
        }

        Ok(Self { mean, scale })
    }

    pub fn width(&self) -> usize {
        self.mean.len()
    }

    pub fn transform(&self, values: &[f64]) -> Result<Vec<f64>> {
        if values.len() != self.width() || self.scale.len() != self.width() {
            anyhow::bail!(
                "scaler expects {} features, got {}",
                self.width(),
                values.len()
            );
        }
        Ok(values
            .iter()
            .zip(&self.mean)
            .zip(&self.scale)
            .map(|((v, m), s)| (v - m) / s)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fit_then_transform_standardises() -> Result<()> {
        let samples = vec![vec![1.0, 5.0], vec![3.0, 5.0]];
        let scaler = StandardScaler::fit(&samples)?;
        assert_eq!(scaler.mean, vec![2.0, 5.0]);
        assert_eq!(scaler.scale, vec![1.0, 1.0]);
        assert_eq!(scaler.transform(&[3.0, 7.0])?, vec![1.0, 2.0]);
        Ok(())
    }

    #[test]
    fn fit_rejects_ragged_rows() {
        let samples = vec![vec![1.0, 2.0], vec![1.0]];
        assert!(StandardScaler::fit(&samples).is_err());
        assert!(StandardScaler::fit(&[]).is_err());
    }

    #[test]
    fn transform_checks_width() {
        let scaler = StandardScaler::new(vec![0.0; 10], vec![1.0; 10]);
        assert!(scaler.transform(&[1.0, 2.0]).is_err());
    }
}
